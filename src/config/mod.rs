pub mod traits;
pub mod evolution;
pub mod simulation;
pub mod fitness;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{
    CatalogKind, EvolutionConfig, ReelBounds, SelectionMethod, MAX_SEED, MAX_WEIGHT_CEILING,
};
pub use simulation::SimulationConfig;
pub use fitness::{FitnessConfig, TierBand};
pub use traits::ConfigSection;
