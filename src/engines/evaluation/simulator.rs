use std::sync::Arc;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    catalog::Catalog,
    config::{ConfigSection, SimulationConfig},
    engines::evaluation::{session::PlayerSession, spin::SpinEvaluator},
    engines::generation::genome::ReelSet,
    engines::metrics::stats::{SimReport, SimStats},
    error::{ReelOptError, Result},
};

/// Monte Carlo player population for a single reel configuration
pub struct PopulationSimulator {
    catalog: Arc<Catalog>,
    config: SimulationConfig,
}

impl PopulationSimulator {
    pub fn new(catalog: Arc<Catalog>, config: SimulationConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ReelOptError::Simulation(e.to_string()))?;
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Players run one after another on the same stream; derived metrics are
    /// computed once every player has finished.
    pub fn run<R: Rng + ?Sized>(&self, reels: &ReelSet, rng: &mut R) -> Result<SimReport> {
        let evaluator = SpinEvaluator::new(&self.catalog, reels)?;
        let mut stats = SimStats::new();

        for _ in 0..self.config.players {
            let mut session = PlayerSession::new(self.config.starting_balance);
            let outcome = session.play(&evaluator, &self.config, &mut stats, rng);
            stats.record_session(outcome, session.peak_balance);
        }

        debug!(
            "Simulated {} players, {} spins, paid {:.2} of {:.2}",
            stats.players, stats.spins, stats.total_paid, stats.total_wagered
        );

        Ok(stats.finalize())
    }

    pub fn run_seeded(&self, reels: &ReelSet, seed: u64) -> Result<SimReport> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.run(reels, &mut rng)
    }
}
