use super::traits::{check_positive, ConfigSection};
use crate::error::ReelOptError;
use serde::{Deserialize, Serialize};

/// Allowed band for a tier rate (percent of spins) and the linear penalty
/// applied per percentage point outside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    pub min: f64,
    pub max: f64,
    pub scale: f64,
}

impl TierBand {
    pub fn ceiling(max: f64, scale: f64) -> Self {
        Self { min: 0.0, max, scale }
    }

    pub fn penalty(&self, rate_pct: f64) -> f64 {
        if rate_pct < self.min {
            (self.min - rate_pct) * self.scale
        } else if rate_pct > self.max {
            (rate_pct - self.max) * self.scale
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    pub target_rtp: f64,
    pub target_win_rate: f64,
    pub win_rate_weight: f64,
    /// House losses are divided by this before being added to the score
    pub house_loss_scale: f64,
    pub small_band: TierBand,
    pub medium_band: TierBand,
    pub big_band: TierBand,
    pub jackpot_band: TierBand,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            target_rtp: 95.0,
            target_win_rate: 30.0,
            win_rate_weight: 2.0,
            house_loss_scale: 1000.0,
            small_band: TierBand { min: 15.0, max: 30.0, scale: 0.5 },
            medium_band: TierBand::ceiling(5.0, 2.0),
            big_band: TierBand::ceiling(1.0, 10.0),
            jackpot_band: TierBand::ceiling(0.1, 50.0),
        }
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), ReelOptError> {
        if !(0.0..=1000.0).contains(&self.target_rtp) {
            return Err(ReelOptError::Configuration(
                "Target RTP must be between 0 and 1000 percent".to_string()
            ));
        }
        if !(0.0..=100.0).contains(&self.target_win_rate) {
            return Err(ReelOptError::Configuration(
                "Target win rate must be between 0 and 100 percent".to_string()
            ));
        }
        if !self.win_rate_weight.is_finite() || self.win_rate_weight <= 1.0 {
            return Err(ReelOptError::Configuration(format!(
                "Win rate weight must be greater than 1, got {}",
                self.win_rate_weight
            )));
        }
        check_positive("House loss scale", self.house_loss_scale)?;
        for (name, band) in [
            ("small", &self.small_band),
            ("medium", &self.medium_band),
            ("big", &self.big_band),
            ("jackpot", &self.jackpot_band),
        ] {
            if band.min < 0.0 || band.min > band.max || band.scale < 0.0 {
                return Err(ReelOptError::Configuration(format!(
                    "The {} tier band must satisfy 0 <= min <= max and scale >= 0",
                    name
                )));
            }
        }
        Ok(())
    }
}
