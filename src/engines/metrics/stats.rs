// src/engines/metrics/stats.rs
use serde::{Deserialize, Serialize};

use crate::types::{SessionOutcome, TierThresholds, WinTier};

/// Counters accumulated while a simulation runs.
///
/// Only raw totals live here; every ratio is computed once by
/// [`SimStats::finalize`], which consumes the accumulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimStats {
    pub players: u64,
    pub spins: u64,
    pub total_wagered: f64,
    pub total_paid: f64,
    /// Spins with any payout
    pub wins: u64,
    /// Spins that paid nothing
    pub losses: u64,
    /// Spins that returned exactly the wager
    pub pushes: u64,
    /// Spins that returned more than the wager
    pub net_wins: u64,
    pub small_wins: u64,
    pub medium_wins: u64,
    pub big_wins: u64,
    pub jackpots: u64,
    pub largest_multiplier: f64,
    /// Highest bankroll any player reached during a session
    pub highest_balance: f64,
    pub bankruptcies: u64,
    pub cash_outs: u64,
    pub still_playing: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_spin(&mut self, wager: f64, payout: f64, tiers: &TierThresholds) {
        self.spins += 1;
        self.total_wagered += wager;
        self.total_paid += payout;

        if payout <= 0.0 {
            self.losses += 1;
            return;
        }

        self.wins += 1;
        if payout == wager {
            self.pushes += 1;
        } else if payout > wager {
            self.net_wins += 1;
        }

        let multiplier = if wager > 0.0 { payout / wager } else { 0.0 };
        self.largest_multiplier = self.largest_multiplier.max(multiplier);
        match tiers.classify(multiplier) {
            WinTier::Small => self.small_wins += 1,
            WinTier::Medium => self.medium_wins += 1,
            WinTier::Big => self.big_wins += 1,
            WinTier::Jackpot => self.jackpots += 1,
        }
    }

    pub fn record_session(&mut self, outcome: SessionOutcome, peak_balance: f64) {
        self.players += 1;
        self.highest_balance = self.highest_balance.max(peak_balance);
        match outcome {
            SessionOutcome::Bankrupt => self.bankruptcies += 1,
            SessionOutcome::CashedOut => self.cash_outs += 1,
            SessionOutcome::StillPlaying => self.still_playing += 1,
        }
    }

    pub fn tier_total(&self) -> u64 {
        self.small_wins + self.medium_wins + self.big_wins + self.jackpots
    }

    /// Compute derived metrics. The returned report is read-only.
    pub fn finalize(self) -> SimReport {
        let spins = self.spins as f64;
        let players = self.players as f64;
        let house_profit = self.total_wagered - self.total_paid;

        SimReport {
            rtp_pct: percent(self.total_paid, self.total_wagered),
            win_rate_pct: percent(self.wins as f64, spins),
            small_rate_pct: percent(self.small_wins as f64, spins),
            medium_rate_pct: percent(self.medium_wins as f64, spins),
            big_rate_pct: percent(self.big_wins as f64, spins),
            jackpot_rate_pct: percent(self.jackpots as f64, spins),
            house_profit,
            house_profit_pct: percent(house_profit, self.total_wagered),
            avg_spins_per_player: ratio(spins, players),
            bankrupt_pct: percent(self.bankruptcies as f64, players),
            cash_out_pct: percent(self.cash_outs as f64, players),
            stats: self,
        }
    }
}

/// `numerator / denominator * 100`, or 0 when the denominator is 0
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Finished simulation: raw counters plus derived percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    stats: SimStats,
    rtp_pct: f64,
    win_rate_pct: f64,
    small_rate_pct: f64,
    medium_rate_pct: f64,
    big_rate_pct: f64,
    jackpot_rate_pct: f64,
    house_profit: f64,
    house_profit_pct: f64,
    avg_spins_per_player: f64,
    bankrupt_pct: f64,
    cash_out_pct: f64,
}

impl SimReport {
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn rtp_pct(&self) -> f64 {
        self.rtp_pct
    }

    pub fn win_rate_pct(&self) -> f64 {
        self.win_rate_pct
    }

    pub fn tier_rate_pct(&self, tier: WinTier) -> f64 {
        match tier {
            WinTier::Small => self.small_rate_pct,
            WinTier::Medium => self.medium_rate_pct,
            WinTier::Big => self.big_rate_pct,
            WinTier::Jackpot => self.jackpot_rate_pct,
        }
    }

    pub fn house_profit(&self) -> f64 {
        self.house_profit
    }

    pub fn house_profit_pct(&self) -> f64 {
        self.house_profit_pct
    }

    pub fn avg_spins_per_player(&self) -> f64 {
        self.avg_spins_per_player
    }

    pub fn bankrupt_pct(&self) -> f64 {
        self.bankrupt_pct
    }

    pub fn cash_out_pct(&self) -> f64 {
        self.cash_out_pct
    }
}
