pub mod analytic;
pub mod fitness;
pub mod stats;

pub use analytic::{analytic_line_hit_pct, analytic_rtp, LineExpectation};
pub use fitness::{FitnessBreakdown, FitnessFunction};
pub use stats::{SimReport, SimStats};
