use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Two percentages closer than this are considered equal
pub const PERCENTAGE_TOLERANCE: f64 = 0.001;

/// A percentage expressed in points, e.g. `12.5` for 12.5%
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Percentage(f64);

impl Percentage {
    pub fn create(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidPercentage(format!(
                "percentage must be a finite number: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Build from a ratio, e.g. `0.125` becomes 12.5%
    pub fn from_decimal(ratio: f64) -> Result<Self, ValidationError> {
        Self::create(ratio * 100.0)
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The ratio form, e.g. 12.5% becomes `0.125`
    pub fn decimal(&self) -> f64 {
        self.0 / 100.0
    }
}

impl PartialEq for Percentage {
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < PERCENTAGE_TOLERANCE
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
