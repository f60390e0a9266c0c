//! Spin evaluation: window draw and payline matching

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::catalog::{Catalog, Payline};
use crate::engines::generation::genome::{Reel, ReelSet};
use crate::error::{ReelOptError, Result};
use crate::types::{Grid, LineWin, SpinOutcome, SymbolId, REEL_COUNT, ROW_COUNT};

enum ReelSampler {
    Strip(Vec<SymbolId>),
    Weighted(WeightedIndex<u64>),
}

impl ReelSampler {
    fn from_reel(reel: &Reel) -> Result<Self> {
        match reel {
            Reel::Strip(strip) => Ok(ReelSampler::Strip(strip.clone())),
            Reel::Weighted(weights) => WeightedIndex::new(weights.iter().map(|&w| w as u64))
                .map(ReelSampler::Weighted)
                .map_err(|e| ReelOptError::InvalidReel(format!("Bad weights: {}", e))),
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> [SymbolId; ROW_COUNT] {
        match self {
            ReelSampler::Strip(strip) => {
                let offset = rng.gen_range(0..strip.len());
                std::array::from_fn(|row| strip[(offset + row) % strip.len()])
            }
            ReelSampler::Weighted(dist) => {
                std::array::from_fn(|_| SymbolId(dist.sample(rng) as u8))
            }
        }
    }
}

/// Spins one fixed reel configuration.
///
/// Construction validates the reels, so a configuration that cannot fill the
/// window is reported here rather than surfacing as silent zero payouts.
pub struct SpinEvaluator<'a> {
    catalog: &'a Catalog,
    samplers: Vec<ReelSampler>,
}

impl<'a> SpinEvaluator<'a> {
    pub fn new(catalog: &'a Catalog, reels: &ReelSet) -> Result<Self> {
        reels.validate(catalog)?;
        let samplers = reels
            .reels()
            .iter()
            .map(ReelSampler::from_reel)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { catalog, samplers })
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = [[SymbolId(0); ROW_COUNT]; REEL_COUNT];
        for (column, sampler) in grid.iter_mut().zip(&self.samplers) {
            *column = sampler.draw(rng);
        }
        grid
    }

    /// Draw a window and evaluate every payline. Negative wagers count as zero.
    pub fn spin<R: Rng + ?Sized>(&self, wager: f64, rng: &mut R) -> SpinOutcome {
        let grid = self.draw(rng);
        let (total_payout, line_wins) = evaluate_grid(self.catalog, &grid, wager);
        SpinOutcome {
            grid,
            total_payout,
            line_wins,
        }
    }

    /// Same as [`spin`](Self::spin) without collecting per-line detail
    pub fn spin_payout<R: Rng + ?Sized>(&self, wager: f64, rng: &mut R) -> f64 {
        let grid = self.draw(rng);
        grid_payout(self.catalog, &grid, wager)
    }
}

/// Length of the left-aligned run of identical symbols along a line
pub fn run_length(symbols: &[SymbolId; REEL_COUNT]) -> usize {
    let first = symbols[0];
    symbols.iter().take_while(|&&s| s == first).count()
}

pub fn evaluate_line(
    catalog: &Catalog,
    line_index: usize,
    payline: &Payline,
    grid: &Grid,
    wager: f64,
) -> Option<LineWin> {
    let symbols = payline.read(grid);
    let run = run_length(&symbols);
    if run < 3 {
        return None;
    }
    let multiplier = catalog.symbol(symbols[0])?.payout(run);
    if multiplier <= 0.0 {
        return None;
    }
    Some(LineWin {
        line_index,
        symbol: symbols[0],
        run_length: run,
        payout: wager.max(0.0) * multiplier,
    })
}

/// Evaluate all active paylines on a fixed grid. Lines are independent, so a
/// spin can pay on several at once.
pub fn evaluate_grid(catalog: &Catalog, grid: &Grid, wager: f64) -> (f64, Vec<LineWin>) {
    let line_wins: Vec<LineWin> = catalog
        .paylines()
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| evaluate_line(catalog, idx, line, grid, wager))
        .collect();
    let total = line_wins.iter().map(|w| w.payout).sum();
    (total, line_wins)
}

pub fn grid_payout(catalog: &Catalog, grid: &Grid, wager: f64) -> f64 {
    catalog
        .paylines()
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| evaluate_line(catalog, idx, line, grid, wager))
        .map(|w| w.payout)
        .sum()
}
