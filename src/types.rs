use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of physical reels in a configuration
pub const REEL_COUNT: usize = 5;

/// Number of visible rows per reel
pub const ROW_COUNT: usize = 3;

/// Index of a symbol inside its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u8);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visible window, indexed `grid[reel][row]`
pub type Grid = [[SymbolId; ROW_COUNT]; REEL_COUNT];

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    pub line_index: usize,
    pub symbol: SymbolId,
    pub run_length: usize,
    pub payout: f64,
}

/// Result of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub total_payout: f64,
    pub line_wins: Vec<LineWin>,
}

/// Classification of a winning spin by payout-to-wager ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinTier {
    Small,
    Medium,
    Big,
    Jackpot,
}

/// Lower bounds (inclusive, as wager multipliers) of the medium/big/jackpot tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium: f64,
    pub big: f64,
    pub jackpot: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium: 10.0,
            big: 50.0,
            jackpot: 100.0,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, multiplier: f64) -> WinTier {
        if multiplier >= self.jackpot {
            WinTier::Jackpot
        } else if multiplier >= self.big {
            WinTier::Big
        } else if multiplier >= self.medium {
            WinTier::Medium
        } else {
            WinTier::Small
        }
    }

    pub fn is_ordered(&self) -> bool {
        0.0 < self.medium && self.medium < self.big && self.big < self.jackpot
    }
}

/// How a simulated player decides to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopPolicy {
    /// Spin a fixed number of times (or until broke)
    FixedSpins,
    /// Spin until broke, until the win target is reached, or until the spin cap
    PlayToTarget,
}

/// How a simulated session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Bankrupt,
    CashedOut,
    StillPlaying,
}

/// Whether the five reels share one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReelMode {
    Uniform,
    Independent,
}

/// Reel composition encoding searched by the optimizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    Strip,
    Weighted,
}
