//! Command-line flags and how they override the loaded configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{AppConfig, CatalogKind, MAX_SEED};
use crate::types::{ReelMode, Representation, StopPolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Uniform,
    Independent,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RepresentationArg {
    Strip,
    Weighted,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CatalogArg {
    Classic,
    Extended,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Genetic search for slot reel configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML or JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target return to player, percent
    #[arg(long)]
    pub target_rtp: Option<f64>,

    /// Target share of winning spins, percent
    #[arg(long)]
    pub target_win_rate: Option<f64>,

    #[arg(long)]
    pub generations: Option<usize>,

    #[arg(long)]
    pub population: Option<usize>,

    /// Simulated players per evaluation
    #[arg(long)]
    pub players: Option<usize>,

    /// Spins per player in fixed-spin mode
    #[arg(long)]
    pub spins: Option<usize>,

    /// Play each session until bankrupt or cashed out
    #[arg(long)]
    pub play_to_target: bool,

    #[arg(long)]
    pub starting_balance: Option<f64>,

    /// Cash-out balance as a multiple of the starting balance
    #[arg(long)]
    pub win_threshold: Option<f64>,

    #[arg(long)]
    pub wager: Option<f64>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    pub representation: Option<RepresentationArg>,

    #[arg(long, value_enum)]
    pub catalog: Option<CatalogArg>,

    /// Seed for a reproducible run
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
    pub seed: Option<u64>,

    /// Worker threads for evaluation (defaults to all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log progress every N generations
    #[arg(long)]
    pub report_every: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the effective configuration as TOML
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl Args {
    /// Overwrite `config` with every flag that was given
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(v) = self.target_rtp {
            config.fitness.target_rtp = v;
        }
        if let Some(v) = self.target_win_rate {
            config.fitness.target_win_rate = v;
        }
        if let Some(v) = self.generations {
            config.evolution.generations = v;
        }
        if let Some(v) = self.population {
            config.evolution.population_size = v;
        }
        if let Some(v) = self.players {
            config.simulation.players = v;
        }
        if let Some(v) = self.spins {
            config.simulation.spins_per_player = v;
        }
        if self.play_to_target {
            config.simulation.stop_policy = StopPolicy::PlayToTarget;
        }
        if let Some(v) = self.starting_balance {
            config.simulation.starting_balance = v;
        }
        if let Some(v) = self.win_threshold {
            config.simulation.win_threshold = v;
        }
        if let Some(v) = self.wager {
            config.simulation.wager = v;
        }
        if let Some(mode) = self.mode {
            config.evolution.reel_mode = match mode {
                ModeArg::Uniform => ReelMode::Uniform,
                ModeArg::Independent => ReelMode::Independent,
            };
        }
        if let Some(representation) = self.representation {
            config.evolution.representation = match representation {
                RepresentationArg::Strip => Representation::Strip,
                RepresentationArg::Weighted => Representation::Weighted,
            };
        }
        if let Some(catalog) = self.catalog {
            config.evolution.catalog = match catalog {
                CatalogArg::Classic => CatalogKind::Classic,
                CatalogArg::Extended => CatalogKind::Extended,
            };
        }
        if let Some(seed) = self.seed {
            config.evolution.seed = Some(seed);
        }
        if let Some(v) = self.report_every {
            config.evolution.report_every = v;
        }
    }
}
