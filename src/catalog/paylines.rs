//! Payline templates for a 5x3 window

use serde::{Deserialize, Serialize};

use crate::types::{Grid, SymbolId, REEL_COUNT, ROW_COUNT};

/// Row index read from each reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    pub name: String,
    pub rows: [usize; REEL_COUNT],
}

impl Payline {
    pub fn new(name: impl Into<String>, rows: [usize; REEL_COUNT]) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn straight(name: impl Into<String>, row: usize) -> Self {
        Self::new(name, [row; REEL_COUNT])
    }

    pub fn is_valid(&self) -> bool {
        self.rows.iter().all(|&row| row < ROW_COUNT)
    }

    /// Symbols visible along this line, left to right
    pub fn read(&self, grid: &Grid) -> [SymbolId; REEL_COUNT] {
        let mut symbols = [SymbolId(0); REEL_COUNT];
        for (reel, &row) in self.rows.iter().enumerate() {
            symbols[reel] = grid[reel][row];
        }
        symbols
    }
}

/// The 10 active lines: horizontals, diagonals, V/W/M and zigzags
pub fn standard_paylines() -> Vec<Payline> {
    vec![
        Payline::straight("middle", 1),
        Payline::straight("top", 0),
        Payline::straight("bottom", 2),
        Payline::new("v", [0, 1, 2, 1, 0]),
        Payline::new("inverted-v", [2, 1, 0, 1, 2]),
        Payline::new("w", [0, 2, 1, 2, 0]),
        Payline::new("m", [2, 0, 1, 0, 2]),
        Payline::new("diagonal-down", [0, 0, 1, 2, 2]),
        Payline::new("diagonal-up", [2, 2, 1, 0, 0]),
        Payline::new("zigzag", [1, 0, 1, 2, 1]),
    ]
}
