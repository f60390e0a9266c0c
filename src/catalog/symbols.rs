//! Symbol definitions

use serde::{Deserialize, Serialize};

/// A paying symbol with its 3/4/5-of-a-kind multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Wager multipliers for runs of 3, 4 and 5 (index 0 = 3 of a kind)
    pub payouts: [f64; 3],
}

impl Symbol {
    pub fn new(name: impl Into<String>, pay3: f64, pay4: f64, pay5: f64) -> Self {
        Self {
            name: name.into(),
            payouts: [pay3, pay4, pay5],
        }
    }

    /// Multiplier for a left-aligned run; runs shorter than 3 pay nothing
    pub fn payout(&self, run_length: usize) -> f64 {
        match run_length {
            3..=5 => self.payouts[run_length - 3],
            _ => 0.0,
        }
    }

    pub fn payout3(&self) -> f64 {
        self.payouts[0]
    }

    pub fn payout4(&self) -> f64 {
        self.payouts[1]
    }

    pub fn payout5(&self) -> f64 {
        self.payouts[2]
    }
}
