use rand::Rng;

use crate::config::SimulationConfig;
use crate::engines::evaluation::spin::SpinEvaluator;
use crate::engines::metrics::stats::SimStats;
use crate::types::{SessionOutcome, StopPolicy};

/// Bankroll of one simulated player
pub struct PlayerSession {
    pub starting_balance: f64,
    pub balance: f64,
    pub spins: usize,
    pub peak_balance: f64,
}

impl PlayerSession {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            starting_balance,
            balance: starting_balance,
            spins: 0,
            peak_balance: starting_balance,
        }
    }

    pub fn can_afford(&self, wager: f64) -> bool {
        self.balance >= wager
    }

    pub fn cash_out_target(&self, win_threshold: f64) -> f64 {
        self.starting_balance * win_threshold
    }

    /// Settle one spin against the bankroll
    pub fn settle(&mut self, wager: f64, payout: f64) {
        self.balance += payout - wager;
        self.spins += 1;
        self.peak_balance = self.peak_balance.max(self.balance);
    }

    /// Play until the bankroll runs dry, the spin limit is hit, or (when
    /// playing to target) the cash-out balance is reached. Every spin is
    /// recorded into `stats`; the session itself is recorded by the caller.
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        evaluator: &SpinEvaluator<'_>,
        config: &SimulationConfig,
        stats: &mut SimStats,
        rng: &mut R,
    ) -> SessionOutcome {
        let limit = config.spin_limit();
        let target = self.cash_out_target(config.win_threshold);

        while self.spins < limit && self.can_afford(config.wager) {
            let payout = evaluator.spin_payout(config.wager, rng);
            stats.record_spin(config.wager, payout, &config.tiers);
            self.settle(config.wager, payout);

            if config.stop_policy == StopPolicy::PlayToTarget && self.balance >= target {
                break;
            }
        }

        self.outcome(config)
    }

    pub fn outcome(&self, config: &SimulationConfig) -> SessionOutcome {
        if self.balance >= self.cash_out_target(config.win_threshold) {
            SessionOutcome::CashedOut
        } else if !self.can_afford(config.wager) {
            SessionOutcome::Bankrupt
        } else {
            SessionOutcome::StillPlaying
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::engines::generation::genome::{Reel, ReelSet};
    use crate::types::SymbolId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_settle_tracks_balance() {
        let mut session = PlayerSession::new(10.0);
        session.settle(1.0, 0.0);
        session.settle(1.0, 5.0);
        assert_eq!(session.balance, 13.0);
        assert_eq!(session.spins, 2);
        assert_eq!(session.peak_balance, 13.0);
    }

    #[test]
    fn test_outcome_classification() {
        let config = SimulationConfig {
            starting_balance: 10.0,
            win_threshold: 2.0,
            wager: 1.0,
            ..Default::default()
        };
        let mut session = PlayerSession::new(10.0);
        assert_eq!(session.outcome(&config), SessionOutcome::StillPlaying);
        session.balance = 0.5;
        assert_eq!(session.outcome(&config), SessionOutcome::Bankrupt);
        session.balance = 20.0;
        assert_eq!(session.outcome(&config), SessionOutcome::CashedOut);
    }

    #[test]
    fn test_losing_machine_goes_bankrupt() {
        // Reel 1 shows only Cherry and reel 2 only Lemon, so no line ever runs to three
        let catalog = Catalog::classic();
        let cherry = Reel::Strip(vec![SymbolId(0); 3]);
        let reels = ReelSet::new([
            cherry.clone(),
            Reel::Strip(vec![SymbolId(1); 3]),
            cherry.clone(),
            cherry.clone(),
            cherry,
        ]);
        let evaluator = SpinEvaluator::new(&catalog, &reels).unwrap();
        let config = SimulationConfig {
            starting_balance: 5.0,
            wager: 1.0,
            stop_policy: StopPolicy::PlayToTarget,
            ..Default::default()
        };
        let mut stats = SimStats::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = PlayerSession::new(config.starting_balance);

        let outcome = session.play(&evaluator, &config, &mut stats, &mut rng);

        assert_eq!(outcome, SessionOutcome::Bankrupt);
        assert_eq!(session.spins, 5);
        assert_eq!(stats.spins, 5);
        assert_eq!(stats.total_paid, 0.0);
    }

    #[test]
    fn test_fixed_spins_respects_limit() {
        let catalog = Catalog::classic();
        let reels = ReelSet::uniform(Reel::Weighted(vec![1; 7]));
        let evaluator = SpinEvaluator::new(&catalog, &reels).unwrap();
        let config = SimulationConfig {
            spins_per_player: 25,
            starting_balance: 1_000.0,
            ..Default::default()
        };
        let mut stats = SimStats::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut session = PlayerSession::new(config.starting_balance);

        session.play(&evaluator, &config, &mut stats, &mut rng);

        assert_eq!(session.spins, 25);
        assert_eq!(stats.spins, 25);
    }
}
