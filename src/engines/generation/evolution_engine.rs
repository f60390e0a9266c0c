use std::sync::Arc;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::config::{AppConfig, ConfigSection, EvolutionConfig, SelectionMethod};
use crate::engines::evaluation::PopulationSimulator;
use crate::engines::generation::{
    genome::ReelSet,
    history::{EvolutionHistory, Generation, Individual, Origin},
    operators::{crossover_reel_set, mutate_reel_set, tournament_selection, truncation_selection},
    seeding::seed_population,
};
use crate::engines::metrics::FitnessFunction;
use crate::error::Result;
use crate::types::Representation;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: &Generation);
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_generation_complete(&mut self, generation: &Generation) {
        (**self).on_generation_complete(generation);
    }
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    catalog: Arc<Catalog>,
    simulator: PopulationSimulator,
    fitness: FitnessFunction,
    rng: ChaCha8Rng,
}

impl EvolutionEngine {
    pub fn new(catalog: Arc<Catalog>, config: &AppConfig) -> Result<Self> {
        config.evolution.validate()?;
        config.fitness.validate()?;
        let simulator = PopulationSimulator::new(catalog.clone(), config.simulation.clone())?;

        let rng = match config.evolution.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            config: config.evolution.clone(),
            catalog,
            simulator,
            fitness: FitnessFunction::new(config.fitness.clone()),
            rng,
        })
    }

    /// Engine over the catalog named in the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(Arc::new(config.evolution.catalog.build()), config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Run the configured number of generations, generation 0 included
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionHistory> {
        info!(
            "Starting evolution: {} generations x {} individuals, {:?} {:?} reels, {} symbols",
            self.config.generations,
            self.config.population_size,
            self.config.reel_mode,
            self.config.representation,
            self.catalog.len()
        );

        let target_rtp = self.fitness.config().target_rtp;
        let mut candidates = seed_population(&self.catalog, &self.config, target_rtp, &mut self.rng);
        let mut elites: Vec<Individual> = Vec::new();
        let mut history = EvolutionHistory::new();

        for index in 0..self.config.generations {
            callback.on_generation_start(index);

            let mut individuals = elites;
            individuals.extend(self.evaluate(candidates)?);
            let generation = Generation::new(index, individuals);

            if let Some(best) = generation.best() {
                debug!(
                    "Generation {} ranked: best {:.4} ({:?}), mean {:.4}",
                    index,
                    best.fitness(),
                    best.origin(),
                    generation.mean_fitness()
                );
            }
            callback.on_generation_complete(&generation);

            if index + 1 == self.config.generations {
                history.push(generation);
                break;
            }

            let (next_elites, next_candidates) = self.breed(&generation);
            elites = next_elites;
            candidates = next_candidates;
            history.push(generation);
        }

        if let Some(best) = history.best() {
            info!(
                "Evolution finished: best fitness {:.4}, RTP {:.2}%, win rate {:.2}%",
                best.fitness(),
                best.report().rtp_pct(),
                best.report().win_rate_pct()
            );
        }

        Ok(history)
    }

    /// Simulate and score new individuals in parallel. Seeds are drawn from
    /// the master stream up front so a seeded run does not depend on the
    /// order rayon schedules the work.
    fn evaluate(&mut self, candidates: Vec<(ReelSet, Origin)>) -> Result<Vec<Individual>> {
        let seeds: Vec<u64> = candidates.iter().map(|_| self.rng.gen()).collect();
        let simulator = &self.simulator;
        let fitness = &self.fitness;

        candidates
            .into_par_iter()
            .zip(seeds)
            .map(|((reels, origin), seed)| {
                let report = simulator.run_seeded(&reels, seed)?;
                let breakdown = fitness.evaluate(&report);
                Ok(Individual::new(reels, report, breakdown, origin))
            })
            .collect()
    }

    /// Elites are copied with their scores; the remaining slots are filled
    /// with children that still need evaluating.
    fn breed(&mut self, ranked: &Generation) -> (Vec<Individual>, Vec<(ReelSet, Origin)>) {
        let config = &self.config;
        let rng = &mut self.rng;
        let symbols = self.catalog.len();
        let population = ranked.individuals();

        let elites: Vec<Individual> = population
            .iter()
            .take(config.elite_count)
            .map(Individual::as_elite)
            .collect();

        let slots = config.population_size.saturating_sub(elites.len());
        let mut children = Vec::with_capacity(slots);
        for _ in 0..slots {
            let strong = rng.gen_bool(config.strong_mutation_prob);
            let parent = select_parent(population, strong, config, rng);
            let mut origin = if strong {
                Origin::StrongMutation
            } else {
                Origin::Mutation
            };

            let mut base = parent.reels().clone();
            if config.representation == Representation::Weighted
                && rng.gen_bool(config.crossover_rate)
            {
                let other = select_parent(population, false, config, rng);
                base = crossover_reel_set(&base, other.reels(), config.reel_mode, config, rng);
                origin = Origin::Crossover;
            }

            let child = mutate_reel_set(&base, strong, config.reel_mode, config, symbols, rng);
            children.push((child, origin));
        }

        (elites, children)
    }
}

/// Truncation draws from the top half for normal and the top third for
/// strong mutation; tournament ignores the distinction.
fn select_parent<'a, R: Rng>(
    ranked: &'a [Individual],
    strong: bool,
    config: &EvolutionConfig,
    rng: &mut R,
) -> &'a Individual {
    match config.selection_method {
        SelectionMethod::Truncation => {
            truncation_selection(ranked, if strong { 3 } else { 2 }, rng)
        }
        SelectionMethod::Tournament => tournament_selection(ranked, config.tournament_size, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::progress::SilentProgress;

    fn small_config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.evolution.population_size = 10;
        config.evolution.generations = 4;
        config.evolution.elite_count = 2;
        config.evolution.seed = Some(seed);
        config.simulation.players = 10;
        config.simulation.spins_per_player = 40;
        config
    }

    #[test]
    fn test_history_has_every_generation() {
        let mut engine = EvolutionEngine::from_config(&small_config(1)).unwrap();
        let history = engine.run(SilentProgress).unwrap();
        assert_eq!(history.len(), 4);
        assert!(history.generations().iter().all(|g| g.len() == 10));
        assert_eq!(history.generation(0).unwrap().index(), 0);
    }

    #[test]
    fn test_best_fitness_never_regresses() {
        let mut engine = EvolutionEngine::from_config(&small_config(2)).unwrap();
        let history = engine.run(SilentProgress).unwrap();
        let best = history.best_per_generation();
        assert!(best.windows(2).all(|w| w[1] <= w[0]), "{:?}", best);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = EvolutionEngine::from_config(&small_config(3))
            .unwrap()
            .run(SilentProgress)
            .unwrap();
        let b = EvolutionEngine::from_config(&small_config(3))
            .unwrap()
            .run(SilentProgress)
            .unwrap();
        assert_eq!(a.best_per_generation(), b.best_per_generation());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = small_config(4);
        config.evolution.elite_count = 10;
        assert!(EvolutionEngine::from_config(&config).is_err());
    }

    #[test]
    fn test_oversized_weight_ceiling_is_rejected() {
        let mut config = small_config(5);
        config.evolution.bounds.max_weight = u32::MAX;
        assert!(EvolutionEngine::from_config(&config).is_err());
    }
}
