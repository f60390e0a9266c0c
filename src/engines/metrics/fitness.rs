// src/engines/metrics/fitness.rs
use serde::{Deserialize, Serialize};

use crate::config::FitnessConfig;
use crate::engines::metrics::stats::SimReport;
use crate::types::WinTier;

/// Score components; `total` is their sum and lower is better
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub rtp_error: f64,
    pub win_rate_error: f64,
    pub house_loss_penalty: f64,
    pub distribution_penalty: f64,
    pub total: f64,
}

/// Distance from the target RTP, win rate and win-size shape.
///
/// RTP alone cannot tell a steady machine from one that pays a rare huge
/// jackpot, so tier rates outside their bands add linear penalties, scaled so
/// that excess big wins cost far more than a loose small-win rate.
#[derive(Debug, Clone)]
pub struct FitnessFunction {
    config: FitnessConfig,
}

impl FitnessFunction {
    pub fn new(config: FitnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    pub fn evaluate(&self, report: &SimReport) -> FitnessBreakdown {
        let rtp_error = (report.rtp_pct() - self.config.target_rtp).abs();
        let win_rate_error =
            (report.win_rate_pct() - self.config.target_win_rate).abs() * self.config.win_rate_weight;

        let house_loss_penalty = if report.house_profit() < 0.0 {
            report.house_profit().abs() / self.config.house_loss_scale
        } else {
            0.0
        };

        let distribution_penalty = self.config.small_band.penalty(report.tier_rate_pct(WinTier::Small))
            + self.config.medium_band.penalty(report.tier_rate_pct(WinTier::Medium))
            + self.config.big_band.penalty(report.tier_rate_pct(WinTier::Big))
            + self.config.jackpot_band.penalty(report.tier_rate_pct(WinTier::Jackpot));

        let total = rtp_error + win_rate_error + house_loss_penalty + distribution_penalty;
        // A NaN score would poison ranking
        let total = if total.is_finite() { total } else { f64::MAX };

        FitnessBreakdown {
            rtp_error,
            win_rate_error,
            house_loss_penalty,
            distribution_penalty,
            total,
        }
    }
}
