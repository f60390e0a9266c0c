use crate::error::ReelOptError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), ReelOptError>;
}

pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), ReelOptError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ReelOptError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), ReelOptError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ReelOptError::Configuration(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}
