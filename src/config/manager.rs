use super::{
    evolution::EvolutionConfig,
    fitness::FitnessConfig,
    simulation::SimulationConfig,
    traits::ConfigSection,
};
use crate::error::ReelOptError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `REELOPT__EVOLUTION__GENERATIONS=80`
pub const ENV_PREFIX: &str = "REELOPT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub simulation: SimulationConfig,
    pub fitness: FitnessConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ReelOptError> {
        self.evolution.validate()?;
        self.simulation.validate()?;
        self.fitness.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Layer defaults, an optional TOML/JSON file and `REELOPT__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ReelOptError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(Self { config })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReelOptError> {
        Self::load(Some(path.as_ref()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReelOptError> {
        let toml_str = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Apply `f` and re-validate; the previous configuration is kept on error
    pub fn update<F>(&mut self, f: F) -> Result<(), ReelOptError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
