use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::engines::generation::genome::ReelSet;
use crate::engines::metrics::{FitnessBreakdown, SimReport};

/// How an individual entered the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    AnalyticSeed,
    SeedVariant,
    Elite,
    Mutation,
    StrongMutation,
    Crossover,
}

/// An evaluated reel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    reels: ReelSet,
    report: SimReport,
    fitness: FitnessBreakdown,
    origin: Origin,
}

impl Individual {
    pub fn new(reels: ReelSet, report: SimReport, fitness: FitnessBreakdown, origin: Origin) -> Self {
        Self {
            reels,
            report,
            fitness,
            origin,
        }
    }

    pub fn reels(&self) -> &ReelSet {
        &self.reels
    }

    pub fn report(&self) -> &SimReport {
        &self.report
    }

    pub fn breakdown(&self) -> &FitnessBreakdown {
        &self.fitness
    }

    /// Scalar score, lower is better
    pub fn fitness(&self) -> f64 {
        self.fitness.total
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Deep copy carried into the next generation without re-simulation
    pub fn as_elite(&self) -> Self {
        Self {
            origin: Origin::Elite,
            ..self.clone()
        }
    }
}

pub fn compare_fitness(a: &Individual, b: &Individual) -> Ordering {
    a.fitness().total_cmp(&b.fitness())
}

/// One ranked, immutable generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    index: usize,
    individuals: Vec<Individual>,
}

impl Generation {
    /// Ranks `individuals` best first
    pub fn new(index: usize, mut individuals: Vec<Individual>) -> Self {
        individuals.sort_by(compare_fitness);
        Self { index, individuals }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(Individual::fitness).sum::<f64>() / self.individuals.len() as f64
    }
}

/// Every generation of a run, oldest first. Past generations are never
/// modified once pushed, so any of them can be inspected after the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionHistory {
    generations: Vec<Generation>,
}

impl EvolutionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, generation: Generation) {
        self.generations.push(generation);
    }

    pub fn generation(&self, index: usize) -> Option<&Generation> {
        self.generations.get(index)
    }

    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    pub fn latest(&self) -> Option<&Generation> {
        self.generations.last()
    }

    /// Best individual of the final population
    pub fn best(&self) -> Option<&Individual> {
        self.latest().and_then(Generation::best)
    }

    pub fn best_per_generation(&self) -> Vec<f64> {
        self.generations
            .iter()
            .filter_map(|g| g.best().map(Individual::fitness))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::genome::Reel;
    use crate::engines::metrics::SimStats;

    fn individual(total: f64) -> Individual {
        Individual::new(
            ReelSet::uniform(Reel::Weighted(vec![1; 7])),
            SimStats::new().finalize(),
            FitnessBreakdown {
                total,
                ..Default::default()
            },
            Origin::Mutation,
        )
    }

    #[test]
    fn test_generation_is_ranked_ascending() {
        let generation = Generation::new(0, vec![individual(3.0), individual(1.0), individual(2.0)]);
        let scores: Vec<f64> = generation.individuals().iter().map(Individual::fitness).collect();
        assert_eq!(scores, vec![1.0, 2.0, 3.0]);
        assert_eq!(generation.best().unwrap().fitness(), 1.0);
        assert_eq!(generation.mean_fitness(), 2.0);
    }

    #[test]
    fn test_elite_copy_keeps_score() {
        let original = individual(4.5);
        let elite = original.as_elite();
        assert_eq!(elite.fitness(), 4.5);
        assert_eq!(elite.origin(), Origin::Elite);
        assert_eq!(elite.reels(), original.reels());
    }

    #[test]
    fn test_history_indexes_generations() {
        let mut history = EvolutionHistory::new();
        history.push(Generation::new(0, vec![individual(5.0)]));
        history.push(Generation::new(1, vec![individual(2.0), individual(6.0)]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.generation(0).unwrap().len(), 1);
        assert_eq!(history.best().unwrap().fitness(), 2.0);
        assert_eq!(history.best_per_generation(), vec![5.0, 2.0]);
        assert!(history.generation(2).is_none());
    }
}
