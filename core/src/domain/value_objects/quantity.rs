//! Quantity value object
//!
//! Number of units held or traded. Fractional units are allowed, negative
//! ones never are.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InvariantViolation, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn create(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO {
            return Err(ValidationError::InvalidQuantity(format!(
                "quantity cannot be negative: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_greater_than(&self, other: &Quantity) -> bool {
        self.0 > other.0
    }

    pub fn add(&self, other: &Quantity) -> Result<Quantity, InvariantViolation> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .ok_or_else(|| InvariantViolation::Overflow(format!("{} + {}", self.0, other.0)))
    }

    pub fn subtract(&self, other: &Quantity) -> Result<Quantity, InvariantViolation> {
        if other.0 > self.0 {
            return Err(InvariantViolation::InsufficientQuantity {
                available: self.0,
                requested: other.0,
            });
        }
        Ok(Quantity(self.0 - other.0))
    }

    pub fn multiply(&self, factor: Decimal) -> Result<Quantity, ValidationError> {
        if factor < Decimal::ZERO {
            return Err(ValidationError::InvalidQuantity(format!(
                "cannot multiply by a negative factor: {}",
                factor
            )));
        }
        self.0.checked_mul(factor).map(Quantity).ok_or_else(|| {
            ValidationError::InvalidQuantity(format!("{} x {} overflows", self.0, factor))
        })
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
