//! Money value object
//!
//! A decimal amount tagged with an ISO-4217 style currency code. Arithmetic
//! never mixes currencies and never silently produces a negative balance
//! unless the caller opts into [`NegativeBalancePolicy::Allow`].

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Quantity;
use crate::error::{InvariantViolation, ValidationError};

/// Currency used when none is given
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Whether a subtraction may produce a negative amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeBalancePolicy {
    #[default]
    Disallow,
    Allow,
}

impl std::fmt::Display for NegativeBalancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NegativeBalancePolicy::Disallow => write!(f, "disallow"),
            NegativeBalancePolicy::Allow => write!(f, "allow"),
        }
    }
}

impl std::str::FromStr for NegativeBalancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disallow" | "deny" => Ok(NegativeBalancePolicy::Disallow),
            "allow" => Ok(NegativeBalancePolicy::Allow),
            _ => Err(format!("Unknown negative balance policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    /// Create a non-negative amount, in `currency` or [`DEFAULT_CURRENCY`]
    pub fn create(amount: Decimal, currency: Option<&str>) -> Result<Self, ValidationError> {
        let currency = normalize_currency(currency.unwrap_or(DEFAULT_CURRENCY))?;
        if amount < Decimal::ZERO {
            return Err(ValidationError::InvalidMoney(format!(
                "amount cannot be negative: {}",
                amount
            )));
        }
        Ok(Self { amount, currency })
    }

    pub fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn zero_in(currency: &str) -> Result<Self, ValidationError> {
        Self::create(Decimal::ZERO, Some(currency))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn add(&self, other: &Money) -> Result<Money, InvariantViolation> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_add(other.amount).ok_or_else(|| {
            InvariantViolation::Overflow(format!("{} + {}", self.amount, other.amount))
        })?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Subtract under the default policy (negative results rejected)
    pub fn subtract(&self, other: &Money) -> Result<Money, InvariantViolation> {
        self.subtract_with(other, NegativeBalancePolicy::Disallow)
    }

    pub fn subtract_with(
        &self,
        other: &Money,
        policy: NegativeBalancePolicy,
    ) -> Result<Money, InvariantViolation> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_sub(other.amount).ok_or_else(|| {
            InvariantViolation::Overflow(format!("{} - {}", self.amount, other.amount))
        })?;
        if amount < Decimal::ZERO && policy == NegativeBalancePolicy::Disallow {
            return Err(InvariantViolation::NegativeBalance {
                amount,
                currency: self.currency.clone(),
            });
        }
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    pub fn multiply(&self, factor: Decimal) -> Result<Money, ValidationError> {
        if factor < Decimal::ZERO {
            return Err(ValidationError::InvalidMoney(format!(
                "cannot multiply by a negative factor: {}",
                factor
            )));
        }
        let amount = self.amount.checked_mul(factor).ok_or_else(|| {
            ValidationError::InvalidMoney(format!("{} x {} overflows", self.amount, factor))
        })?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Price times units
    pub fn times(&self, quantity: &Quantity) -> Result<Money, InvariantViolation> {
        let amount = self.amount.checked_mul(quantity.value()).ok_or_else(|| {
            InvariantViolation::Overflow(format!("{} x {}", self.amount, quantity))
        })?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Order two amounts of the same currency
    pub fn compare(&self, other: &Money) -> Result<Ordering, InvariantViolation> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn is_greater_than(&self, other: &Money) -> Result<bool, InvariantViolation> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn is_less_than(&self, other: &Money) -> Result<bool, InvariantViolation> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), InvariantViolation> {
        if self.currency != other.currency {
            return Err(InvariantViolation::CurrencyMismatch {
                expected: self.currency.clone(),
                found: other.currency.clone(),
            });
        }
        Ok(())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount.round_dp(2), self.currency)
    }
}

fn normalize_currency(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidMoney(format!(
            "currency must be a three-letter code: '{}'",
            raw
        )));
    }
    Ok(code)
}
