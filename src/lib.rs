pub mod catalog;
pub mod cli;
pub mod config;
pub mod engines;
pub mod error;
pub mod report;
pub mod types;

pub use catalog::Catalog;
pub use config::{AppConfig, ConfigManager};
pub use engines::generation::{EvolutionEngine, EvolutionHistory, Reel, ReelSet};
pub use error::{ReelOptError, Result};
pub use report::OptimizationReport;
