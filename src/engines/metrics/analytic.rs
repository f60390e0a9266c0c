// src/engines/metrics/analytic.rs
//! Exact expectations from reel frequencies.
//!
//! Every payline reads one row per reel. Each row of a reel shows symbol `s`
//! with that reel's effective frequency (uniform offset on a strip, an
//! independent weighted draw otherwise) and reels are independent, so the
//! expected payout of a line only depends on the per-reel marginals.

use crate::catalog::Catalog;
use crate::engines::generation::genome::ReelSet;
use crate::types::REEL_COUNT;

/// Expected wager multiplier and hit probability of a single payline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineExpectation {
    pub multiplier: f64,
    pub hit_probability: f64,
}

pub fn line_expectation(catalog: &Catalog, frequencies: &[Vec<f64>; REEL_COUNT]) -> LineExpectation {
    let mut multiplier = 0.0;
    let mut hit_probability = 0.0;

    for (id, symbol) in catalog.ids().zip(catalog.symbols()) {
        let p: Vec<f64> = frequencies
            .iter()
            .map(|reel| reel.get(id.index()).copied().unwrap_or(0.0))
            .collect();

        let three = p[0] * p[1] * p[2];
        let four = three * p[3];
        let five = four * p[4];

        let outcomes = [
            (three - four, symbol.payout3()),
            (four - five, symbol.payout4()),
            (five, symbol.payout5()),
        ];
        for (probability, pay) in outcomes {
            multiplier += probability * pay;
            if pay > 0.0 {
                hit_probability += probability;
            }
        }
    }

    LineExpectation {
        multiplier,
        hit_probability,
    }
}

/// Long-run RTP in percent for a configuration
pub fn analytic_rtp(catalog: &Catalog, reels: &ReelSet) -> f64 {
    let frequencies = reels.effective_frequencies(catalog.len());
    line_expectation(catalog, &frequencies).multiplier * catalog.paylines().len() as f64 * 100.0
}

/// Probability that a given payline wins on one spin, in percent
pub fn analytic_line_hit_pct(catalog: &Catalog, reels: &ReelSet) -> f64 {
    let frequencies = reels.effective_frequencies(catalog.len());
    line_expectation(catalog, &frequencies).hit_probability * 100.0
}
