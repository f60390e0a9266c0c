//! Final optimization report and the constant table handed to the game.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::engines::generation::{EvolutionHistory, Reel, ReelSet};
use crate::engines::metrics::{analytic_line_hit_pct, analytic_rtp, FitnessBreakdown, SimReport};
use crate::error::{ReelOptError, Result};
use crate::types::{ReelMode, Representation, WinTier};

#[derive(Debug, Clone, Serialize)]
pub struct SymbolShare {
    pub symbol: String,
    /// Occurrences on a strip, or the weight
    pub amount: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReelSummary {
    pub reel: usize,
    pub length: usize,
    pub symbols: Vec<SymbolShare>,
}

impl ReelSummary {
    pub fn new(index: usize, reel: &Reel, catalog: &Catalog) -> Self {
        let counts = reel.counts(catalog.len());
        let frequencies = reel.effective_frequencies(catalog.len());
        let symbols = catalog
            .ids()
            .map(|id| SymbolShare {
                symbol: catalog.name(id).to_string(),
                amount: counts[id.index()],
                percent: frequencies[id.index()] * 100.0,
            })
            .collect();
        Self {
            reel: index + 1,
            length: counts.iter().map(|&c| c as usize).sum(),
            symbols,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub generations: usize,
    pub population_size: usize,
    pub reel_mode: ReelMode,
    pub representation: Representation,
    pub target_rtp: f64,
    pub target_win_rate: f64,
    pub reels: Vec<ReelSummary>,
    pub simulation: SimReport,
    pub fitness: FitnessBreakdown,
    pub analytic_rtp: f64,
    pub analytic_line_hit_pct: f64,
    pub best_per_generation: Vec<f64>,
    pub weight_table: String,
}

impl OptimizationReport {
    pub fn build(catalog: &Catalog, config: &AppConfig, history: &EvolutionHistory) -> Result<Self> {
        let best = history.best().ok_or_else(|| {
            ReelOptError::Simulation("Evolution produced no generations".to_string())
        })?;
        let reels = best.reels();

        Ok(Self {
            generations: history.len(),
            population_size: config.evolution.population_size,
            reel_mode: config.evolution.reel_mode,
            representation: config.evolution.representation,
            target_rtp: config.fitness.target_rtp,
            target_win_rate: config.fitness.target_win_rate,
            reels: reels
                .reels()
                .iter()
                .enumerate()
                .map(|(idx, reel)| ReelSummary::new(idx, reel, catalog))
                .collect(),
            simulation: best.report().clone(),
            fitness: *best.breakdown(),
            analytic_rtp: analytic_rtp(catalog, reels),
            analytic_line_hit_pct: analytic_line_hit_pct(catalog, reels),
            best_per_generation: history.best_per_generation(),
            weight_table: render_weight_table(catalog, reels),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sim = &self.simulation;
        let stats = sim.stats();

        writeln!(f, "=== Best configuration ===")?;
        writeln!(
            f,
            "{} generations x {} individuals, {:?} {:?} reels",
            self.generations, self.population_size, self.reel_mode, self.representation
        )?;
        for reel in &self.reels {
            if self.reel_mode == ReelMode::Uniform && reel.reel > 1 {
                break;
            }
            match self.reel_mode {
                ReelMode::Uniform => writeln!(f, "\nAll reels ({} total):", reel.length)?,
                ReelMode::Independent => {
                    writeln!(f, "\nReel {} ({} total):", reel.reel, reel.length)?
                }
            }
            for share in &reel.symbols {
                writeln!(
                    f,
                    "  {:<12} {:>5}  {:>6.2}%",
                    share.symbol, share.amount, share.percent
                )?;
            }
        }

        writeln!(f, "\n=== Statistics ===")?;
        writeln!(f, "Players:            {}", stats.players)?;
        writeln!(f, "Spins:              {}", stats.spins)?;
        writeln!(f, "Avg spins/player:   {:.1}", sim.avg_spins_per_player())?;
        writeln!(f, "Total wagered:      {:.2}", stats.total_wagered)?;
        writeln!(f, "Total paid:         {:.2}", stats.total_paid)?;
        writeln!(
            f,
            "RTP:                {:.2}% (target {:.2}%, analytic {:.2}%)",
            sim.rtp_pct(),
            self.target_rtp,
            self.analytic_rtp
        )?;
        writeln!(
            f,
            "Win rate:           {:.2}% (target {:.2}%)",
            sim.win_rate_pct(),
            self.target_win_rate
        )?;
        writeln!(f, "Line hit rate:      {:.2}%", self.analytic_line_hit_pct)?;
        writeln!(
            f,
            "Wins/pushes/losses: {}/{}/{}",
            stats.wins, stats.pushes, stats.losses
        )?;
        for (name, tier, count) in [
            ("Small", WinTier::Small, stats.small_wins),
            ("Medium", WinTier::Medium, stats.medium_wins),
            ("Big", WinTier::Big, stats.big_wins),
            ("Jackpot", WinTier::Jackpot, stats.jackpots),
        ] {
            writeln!(f, "  {:<8} {:>8}  {:>7.3}%", name, count, sim.tier_rate_pct(tier))?;
        }
        writeln!(f, "Largest win:        {:.0}x", stats.largest_multiplier)?;
        writeln!(f, "Highest balance:    {:.2}", stats.highest_balance)?;
        writeln!(
            f,
            "House profit:       {:.2} ({:.2}%)",
            sim.house_profit(),
            sim.house_profit_pct()
        )?;
        writeln!(
            f,
            "Sessions:           {:.1}% bankrupt, {:.1}% cashed out, {} still playing",
            sim.bankrupt_pct(),
            sim.cash_out_pct(),
            stats.still_playing
        )?;

        let fitness = &self.fitness;
        writeln!(f, "\n=== Fitness {:.4} ===", fitness.total)?;
        writeln!(f, "RTP error:          {:.4}", fitness.rtp_error)?;
        writeln!(f, "Win rate error:     {:.4}", fitness.win_rate_error)?;
        writeln!(f, "House loss:         {:.4}", fitness.house_loss_penalty)?;
        writeln!(f, "Distribution:       {:.4}", fitness.distribution_penalty)?;

        writeln!(f, "\n=== Reel table ===")?;
        f.write_str(&self.weight_table)
    }
}

/// Reel table as a Rust constant
pub struct WeightTable<'a> {
    catalog: &'a Catalog,
    reels: &'a ReelSet,
}

impl<'a> WeightTable<'a> {
    pub fn new(catalog: &'a Catalog, reels: &'a ReelSet) -> Self {
        Self { catalog, reels }
    }
}

impl fmt::Display for WeightTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.catalog.ids().map(|id| self.catalog.name(id)).collect();
        writeln!(f, "// Symbol order: {}", names.join(", "))?;

        let reels = self.reels.reels();
        match self.reels.representation() {
            Some(Representation::Weighted) | None => {
                writeln!(
                    f,
                    "pub const REEL_WEIGHTS: [[u32; {}]; {}] = [",
                    self.catalog.len(),
                    reels.len()
                )?;
                for (idx, reel) in reels.iter().enumerate() {
                    let row: Vec<String> = reel
                        .counts(self.catalog.len())
                        .iter()
                        .map(|w| w.to_string())
                        .collect();
                    writeln!(f, "    [{}], // reel {}", row.join(", "), idx + 1)?;
                }
            }
            Some(Representation::Strip) => {
                writeln!(f, "pub const REEL_STRIPS: [&[u8]; {}] = [", reels.len())?;
                for (idx, reel) in reels.iter().enumerate() {
                    if let Reel::Strip(strip) = reel {
                        let row: Vec<String> = strip.iter().map(|id| id.0.to_string()).collect();
                        writeln!(f, "    &[{}], // reel {}", row.join(", "), idx + 1)?;
                    }
                }
            }
        }
        writeln!(f, "];")
    }
}

/// Paste-ready Rust constant for the production reel table: `REEL_WEIGHTS`
/// for weighted reels, `REEL_STRIPS` (symbol indices) for strips.
pub fn render_weight_table(catalog: &Catalog, reels: &ReelSet) -> String {
    WeightTable::new(catalog, reels).to_string()
}
