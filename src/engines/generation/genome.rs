//! Reel genomes searched by the optimizer
//!
//! A reel is either an explicit strip of symbols or a weight per catalog
//! symbol. Both encode the same thing, the chance of each symbol showing in a
//! visible row, and both expose it through [`Reel::effective_frequencies`] so
//! the evaluator, the operators and the analytic RTP code have a single path.
//!
//! # Invariants
//!
//! - every catalog symbol appears at least once on a strip
//! - every weight is at least 1
//!
//! Both are maintained by construction in `operators` (repair pass and
//! clamping); [`Reel::satisfies`] exists to assert them in tests and on input.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::ReelBounds;
use crate::error::{ReelOptError, Result};
use crate::types::{Representation, SymbolId, REEL_COUNT, ROW_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reel {
    /// Ordered symbols; the visible window is three consecutive positions
    Strip(Vec<SymbolId>),
    /// One weight per catalog symbol, indexed by `SymbolId`
    Weighted(Vec<u32>),
}

impl Reel {
    pub fn representation(&self) -> Representation {
        match self {
            Reel::Strip(_) => Representation::Strip,
            Reel::Weighted(_) => Representation::Weighted,
        }
    }

    /// Strip length, or number of weights
    pub fn len(&self) -> usize {
        match self {
            Reel::Strip(strip) => strip.len(),
            Reel::Weighted(weights) => weights.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occurrences (strip) or weights (weighted) per catalog symbol
    pub fn counts(&self, symbols: usize) -> Vec<u32> {
        match self {
            Reel::Strip(strip) => {
                let mut counts = vec![0u32; symbols];
                for id in strip {
                    if let Some(count) = counts.get_mut(id.index()) {
                        *count += 1;
                    }
                }
                counts
            }
            Reel::Weighted(weights) => {
                let mut counts = weights.clone();
                counts.resize(symbols, 0);
                counts
            }
        }
    }

    /// Probability of each symbol appearing in any single visible row
    pub fn effective_frequencies(&self, symbols: usize) -> Vec<f64> {
        let counts = self.counts(symbols);
        let total: u64 = counts.iter().map(|&c| c as u64).sum();
        if total == 0 {
            return vec![0.0; symbols];
        }
        counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }

    pub fn covers_catalog(&self, symbols: usize) -> bool {
        self.counts(symbols).iter().all(|&c| c > 0)
    }

    /// Checks that the reel can fill the visible window with catalog symbols
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        match self {
            Reel::Strip(strip) => {
                if strip.len() < ROW_COUNT {
                    return Err(ReelOptError::InvalidReel(format!(
                        "Strip of length {} cannot fill a window of {} rows",
                        strip.len(),
                        ROW_COUNT
                    )));
                }
                if let Some(id) = strip.iter().find(|id| !catalog.contains(**id)) {
                    return Err(ReelOptError::InvalidReel(format!(
                        "Strip references unknown symbol {}",
                        id
                    )));
                }
            }
            Reel::Weighted(weights) => {
                if weights.len() != catalog.len() {
                    return Err(ReelOptError::InvalidReel(format!(
                        "Expected {} weights, got {}",
                        catalog.len(),
                        weights.len()
                    )));
                }
                if let Some(id) = weights.iter().position(|&w| w == 0) {
                    return Err(ReelOptError::InvalidReel(format!(
                        "Weight of symbol #{} is 0",
                        id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Structural invariants: full catalog coverage and the configured bounds
    pub fn satisfies(&self, symbols: usize, bounds: &ReelBounds) -> bool {
        if !self.covers_catalog(symbols) {
            return false;
        }
        match self {
            Reel::Strip(strip) => {
                strip.len() >= bounds.min_strip_len.max(ROW_COUNT)
                    && strip.len() <= bounds.max_strip_len
                    && strip.iter().all(|id| id.index() < symbols)
            }
            Reel::Weighted(weights) => {
                weights.len() == symbols
                    && weights.iter().all(|&w| (1..=bounds.max_weight).contains(&w))
            }
        }
    }
}

/// The five reels of a machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelSet {
    reels: [Reel; REEL_COUNT],
}

impl ReelSet {
    pub fn new(reels: [Reel; REEL_COUNT]) -> Self {
        Self { reels }
    }

    /// Same composition on every reel
    pub fn uniform(reel: Reel) -> Self {
        Self {
            reels: std::array::from_fn(|_| reel.clone()),
        }
    }

    pub fn reels(&self) -> &[Reel; REEL_COUNT] {
        &self.reels
    }

    pub fn into_reels(self) -> [Reel; REEL_COUNT] {
        self.reels
    }

    pub fn is_uniform(&self) -> bool {
        self.reels.iter().all(|r| *r == self.reels[0])
    }

    /// Representation shared by all reels, `None` if they are mixed
    pub fn representation(&self) -> Option<Representation> {
        let first = self.reels[0].representation();
        self.reels
            .iter()
            .all(|r| r.representation() == first)
            .then_some(first)
    }

    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        if self.representation().is_none() {
            return Err(ReelOptError::InvalidReel(
                "Reels mix strip and weighted representations".to_string(),
            ));
        }
        for (idx, reel) in self.reels.iter().enumerate() {
            reel.validate(catalog).map_err(|e| {
                ReelOptError::InvalidReel(format!("reel {}: {}", idx + 1, e))
            })?;
        }
        Ok(())
    }

    pub fn satisfies(&self, symbols: usize, bounds: &ReelBounds) -> bool {
        self.representation().is_some() && self.reels.iter().all(|r| r.satisfies(symbols, bounds))
    }

    /// Per-reel row frequencies
    pub fn effective_frequencies(&self, symbols: usize) -> [Vec<f64>; REEL_COUNT] {
        std::array::from_fn(|idx| self.reels[idx].effective_frequencies(symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u8]) -> Vec<SymbolId> {
        raw.iter().map(|&i| SymbolId(i)).collect()
    }

    #[test]
    fn test_frequencies_match_between_representations() {
        let strip = Reel::Strip(ids(&[0, 0, 1, 2, 0, 1]));
        let weighted = Reel::Weighted(vec![3, 2, 1]);
        assert_eq!(strip.counts(3), vec![3, 2, 1]);
        assert_eq!(strip.effective_frequencies(3), weighted.effective_frequencies(3));
    }

    #[test]
    fn test_short_strip_is_rejected() {
        let catalog = Catalog::classic();
        let reel = Reel::Strip(ids(&[0, 1]));
        assert!(reel.validate(&catalog).is_err());

        let set = ReelSet::uniform(reel);
        assert!(set.validate(&catalog).is_err());
    }

    #[test]
    fn test_weighted_length_must_match_catalog() {
        let catalog = Catalog::classic();
        assert!(Reel::Weighted(vec![1; 3]).validate(&catalog).is_err());
        assert!(Reel::Weighted(vec![0; 7]).validate(&catalog).is_err());
        assert!(Reel::Weighted(vec![1; 7]).validate(&catalog).is_ok());
    }

    #[test]
    fn test_any_zero_weight_is_rejected() {
        let catalog = Catalog::classic();
        assert!(Reel::Weighted(vec![5, 0, 0, 0, 0, 0, 0]).validate(&catalog).is_err());
        assert!(Reel::Weighted(vec![5, 1, 1, 1, 1, 1, 0]).validate(&catalog).is_err());
    }

    #[test]
    fn test_satisfies_detects_missing_symbol() {
        let bounds = ReelBounds { min_strip_len: 3, max_strip_len: 10, max_weight: 100 };
        assert!(Reel::Strip(ids(&[0, 1, 2])).satisfies(3, &bounds));
        assert!(!Reel::Strip(ids(&[0, 1, 1])).satisfies(3, &bounds));
        assert!(!Reel::Weighted(vec![4, 0, 2]).satisfies(3, &bounds));
        assert!(!Reel::Weighted(vec![4, 101, 2]).satisfies(3, &bounds));
    }

    #[test]
    fn test_mixed_representations_rejected() {
        let catalog = Catalog::classic();
        let mut reels: [Reel; REEL_COUNT] = std::array::from_fn(|_| Reel::Weighted(vec![1; 7]));
        reels[2] = Reel::Strip(ids(&[0, 1, 2, 3, 4, 5, 6]));
        let set = ReelSet::new(reels);
        assert!(set.representation().is_none());
        assert!(set.validate(&catalog).is_err());
        assert!(!set.is_uniform());
    }
}
