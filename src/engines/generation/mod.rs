pub mod evolution_engine;
pub mod genome;
pub mod history;
pub mod operators;
pub mod progress;
pub mod seeding;

pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use genome::{Reel, ReelSet};
pub use history::{EvolutionHistory, Generation, Individual, Origin};
pub use progress::{ConsoleProgressCallback, SilentProgress};
pub use seeding::{analytic_seeds, analytic_weights, seed_population};
