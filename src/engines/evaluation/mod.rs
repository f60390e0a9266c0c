pub mod session;
pub mod simulator;
pub mod spin;

pub use session::PlayerSession;
pub use simulator::PopulationSimulator;
pub use spin::{evaluate_grid, evaluate_line, grid_payout, run_length, SpinEvaluator};
