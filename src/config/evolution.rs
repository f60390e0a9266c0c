use super::traits::{check_rate, ConfigSection};
use crate::catalog::Catalog;
use crate::error::ReelOptError;
use crate::types::{ReelMode, Representation, ROW_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub elite_count: usize,
    /// Per-symbol perturbation probability (weighted reels)
    pub mutation_rate: f64,
    /// Probability that a child is produced by a strong mutation
    pub strong_mutation_prob: f64,
    pub strong_edits_min: usize,
    pub strong_edits_max: usize,
    /// Symmetric relative perturbation applied to a weight, e.g. 0.3 = ±30%
    pub perturbation_pct: f64,
    /// Probability of crossover before mutation (weighted reels only)
    pub crossover_rate: f64,
    pub crossover_take_a: f64,
    pub crossover_take_b: f64,
    pub selection_method: SelectionMethod,
    pub tournament_size: usize,
    pub analytic_seed_count: usize,
    pub seed_strip_len: usize,
    pub reel_mode: ReelMode,
    pub representation: Representation,
    pub catalog: CatalogKind,
    pub bounds: ReelBounds,
    pub report_every: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMethod {
    /// Top half for normal mutation, top third for strong mutation
    Truncation,
    Tournament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogKind {
    Classic,
    Extended,
}

impl CatalogKind {
    pub fn build(self) -> Catalog {
        match self {
            CatalogKind::Classic => Catalog::classic(),
            CatalogKind::Extended => Catalog::extended(),
        }
    }
}

/// Largest accepted seed; TOML integers are signed 64-bit
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Largest accepted per-symbol weight; keeps a full reel's weight sum well
/// inside `u32`
pub const MAX_WEIGHT_CEILING: u32 = 1_000_000;

/// Structural limits every reel must respect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelBounds {
    pub min_strip_len: usize,
    pub max_strip_len: usize,
    pub max_weight: u32,
}

impl Default for ReelBounds {
    fn default() -> Self {
        Self {
            min_strip_len: 10,
            max_strip_len: 100,
            max_weight: 100,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 60,
            elite_count: 4,
            mutation_rate: 0.3,
            strong_mutation_prob: 0.3,
            strong_edits_min: 3,
            strong_edits_max: 7,
            perturbation_pct: 0.3,
            crossover_rate: 0.5,
            crossover_take_a: 0.4,
            crossover_take_b: 0.4,
            selection_method: SelectionMethod::Truncation,
            tournament_size: 3,
            analytic_seed_count: 3,
            seed_strip_len: 32,
            reel_mode: ReelMode::Uniform,
            representation: Representation::Weighted,
            catalog: CatalogKind::Classic,
            bounds: ReelBounds::default(),
            report_every: 5,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), ReelOptError> {
        if self.population_size < 2 {
            return Err(ReelOptError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.generations == 0 {
            return Err(ReelOptError::Configuration(
                "Generation count must be at least 1".to_string()
            ));
        }
        if self.elite_count == 0 || self.elite_count >= self.population_size {
            return Err(ReelOptError::Configuration(format!(
                "Elite count must be between 1 and {}",
                self.population_size - 1
            )));
        }
        if self.analytic_seed_count == 0 || self.analytic_seed_count > self.population_size {
            return Err(ReelOptError::Configuration(
                "Analytic seed count must be between 1 and the population size".to_string()
            ));
        }
        check_rate("Mutation rate", self.mutation_rate)?;
        check_rate("Strong mutation probability", self.strong_mutation_prob)?;
        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Crossover take-A probability", self.crossover_take_a)?;
        check_rate("Crossover take-B probability", self.crossover_take_b)?;
        if self.crossover_take_a + self.crossover_take_b > 1.0 {
            return Err(ReelOptError::Configuration(
                "Crossover take-A and take-B probabilities must sum to at most 1".to_string()
            ));
        }
        if !(self.perturbation_pct > 0.0 && self.perturbation_pct < 1.0) {
            return Err(ReelOptError::Configuration(
                "Perturbation percentage must be between 0 and 1 (exclusive)".to_string()
            ));
        }
        if self.strong_edits_min == 0 || self.strong_edits_min > self.strong_edits_max {
            return Err(ReelOptError::Configuration(
                "Strong edit range must satisfy 1 <= min <= max".to_string()
            ));
        }
        if self.tournament_size == 0 {
            return Err(ReelOptError::Configuration(
                "Tournament size must be at least 1".to_string()
            ));
        }
        if self.report_every == 0 {
            return Err(ReelOptError::Configuration(
                "Report interval must be at least 1".to_string()
            ));
        }

        let symbols = self.catalog.build().len();
        if self.bounds.min_strip_len < ROW_COUNT {
            return Err(ReelOptError::Configuration(format!(
                "Minimum strip length must be at least the visible window ({})",
                ROW_COUNT
            )));
        }
        if self.bounds.max_strip_len < self.bounds.min_strip_len.max(symbols) {
            return Err(ReelOptError::Configuration(format!(
                "Maximum strip length {} cannot hold every symbol and the minimum length",
                self.bounds.max_strip_len
            )));
        }
        if self.seed_strip_len < self.bounds.min_strip_len.max(symbols)
            || self.seed_strip_len > self.bounds.max_strip_len
        {
            return Err(ReelOptError::Configuration(
                "Seed strip length must lie within the strip length bounds".to_string()
            ));
        }
        if self.bounds.max_weight == 0 || self.bounds.max_weight > MAX_WEIGHT_CEILING {
            return Err(ReelOptError::Configuration(format!(
                "Maximum weight must be between 1 and {}, got {}",
                MAX_WEIGHT_CEILING, self.bounds.max_weight
            )));
        }
        if let Some(seed) = self.seed {
            if seed > MAX_SEED {
                return Err(ReelOptError::Configuration(format!(
                    "Seed must be at most {}, got {}",
                    MAX_SEED, seed
                )));
            }
        }
        Ok(())
    }
}
