use super::traits::{check_positive, ConfigSection};
use crate::error::ReelOptError;
use crate::types::{StopPolicy, TierThresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub players: usize,
    pub spins_per_player: usize,
    pub wager: f64,
    pub starting_balance: f64,
    /// Balance multiple of the starting bankroll that counts as cashing out
    pub win_threshold: f64,
    pub stop_policy: StopPolicy,
    /// Hard cap on spins per play-to-target session. The session is an
    /// unbounded random walk; the cap stands in for an infinite horizon.
    pub max_spins_per_session: usize,
    pub tiers: TierThresholds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 200,
            spins_per_player: 200,
            wager: 1.0,
            starting_balance: 100.0,
            win_threshold: 2.0,
            stop_policy: StopPolicy::FixedSpins,
            max_spins_per_session: 10_000,
            tiers: TierThresholds::default(),
        }
    }
}

impl SimulationConfig {
    /// Upper bound on spins a single player may take under the active policy
    pub fn spin_limit(&self) -> usize {
        match self.stop_policy {
            StopPolicy::FixedSpins => self.spins_per_player,
            StopPolicy::PlayToTarget => self.max_spins_per_session,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), ReelOptError> {
        if self.players == 0 {
            return Err(ReelOptError::Configuration(
                "Simulation needs at least one player".to_string()
            ));
        }
        if self.stop_policy == StopPolicy::FixedSpins && self.spins_per_player == 0 {
            return Err(ReelOptError::Configuration(
                "Fixed-spin simulation needs at least one spin per player".to_string()
            ));
        }
        if self.max_spins_per_session == 0 {
            return Err(ReelOptError::Configuration(
                "Session spin cap must be at least 1".to_string()
            ));
        }
        check_positive("Wager", self.wager)?;
        check_positive("Starting balance", self.starting_balance)?;
        if self.starting_balance < self.wager {
            return Err(ReelOptError::Configuration(
                "Starting balance must cover at least one wager".to_string()
            ));
        }
        if !self.win_threshold.is_finite() || self.win_threshold <= 1.0 {
            return Err(ReelOptError::Configuration(
                "Win threshold must be a multiplier above 1".to_string()
            ));
        }
        if !self.tiers.is_ordered() {
            return Err(ReelOptError::Configuration(
                "Tier thresholds must satisfy 0 < medium < big < jackpot".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_players_and_spins() {
        let no_players = SimulationConfig { players: 0, ..Default::default() };
        assert!(no_players.validate().is_err());

        let no_spins = SimulationConfig { spins_per_player: 0, ..Default::default() };
        assert!(no_spins.validate().is_err());

        // Play-to-target ignores the fixed spin count
        let target = SimulationConfig {
            spins_per_player: 0,
            stop_policy: StopPolicy::PlayToTarget,
            ..Default::default()
        };
        assert!(target.validate().is_ok());
        assert_eq!(target.spin_limit(), 10_000);
    }

    #[test]
    fn test_rejects_bankroll_below_wager() {
        let config = SimulationConfig {
            wager: 10.0,
            starting_balance: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
