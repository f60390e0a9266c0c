pub mod paylines;
pub mod registry;
pub mod symbols;

pub use paylines::{standard_paylines, Payline};
pub use registry::Catalog;
pub use symbols::Symbol;
