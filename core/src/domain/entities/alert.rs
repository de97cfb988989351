//! Alert domain entity
//!
//! A price condition on an asset that an investor wants to hear about.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::error::{DomainError, InvariantViolation, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Fires when the price reaches or exceeds the threshold
    PriceAbove,
    /// Fires when the price reaches or drops below the threshold
    PriceBelow,
    /// Fires when the price moves by at least `threshold` percent from a reference
    PercentChange,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::PriceAbove => write!(f, "price_above"),
            AlertType::PriceBelow => write!(f, "price_below"),
            AlertType::PercentChange => write!(f, "percent_change"),
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price_above" => Ok(AlertType::PriceAbove),
            "price_below" => Ok(AlertType::PriceBelow),
            "percent_change" => Ok(AlertType::PercentChange),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlertProps {
    pub user_id: UniqueEntityId,
    pub asset_id: UniqueEntityId,
    pub alert_type: AlertType,
    pub threshold: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Alert {
    id: UniqueEntityId,
    props: AlertProps,
}

impl Alert {
    pub fn create(props: AlertProps, id: Option<UniqueEntityId>) -> Result<Self, ValidationError> {
        validate_threshold(props.threshold)?;
        Ok(Self {
            id: UniqueEntityId::or_new(id),
            props,
        })
    }

    pub fn user_id(&self) -> &UniqueEntityId {
        &self.props.user_id
    }

    pub fn asset_id(&self) -> &UniqueEntityId {
        &self.props.asset_id
    }

    pub fn alert_type(&self) -> AlertType {
        self.props.alert_type
    }

    pub fn threshold(&self) -> Decimal {
        self.props.threshold
    }

    pub fn is_active(&self) -> bool {
        self.props.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UniqueEntityId) -> bool {
        &self.props.user_id == user_id
    }

    pub fn set_threshold(&mut self, threshold: Decimal) -> Result<(), DomainError> {
        self.ensure_active()?;
        validate_threshold(threshold)?;
        self.props.threshold = threshold;
        self.touch();
        Ok(())
    }

    pub fn set_type(&mut self, alert_type: AlertType) -> Result<(), InvariantViolation> {
        self.ensure_active()?;
        self.props.alert_type = alert_type;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) {
        if !self.props.is_active {
            self.props.is_active = true;
            self.touch();
        }
    }

    pub fn deactivate(&mut self) {
        if self.props.is_active {
            self.props.is_active = false;
            self.touch();
        }
    }

    /// Whether `price` meets the condition
    ///
    /// `PercentChange` needs a positive `reference` price and never fires
    /// without one. A change too large to compute counts as met. Inactive
    /// alerts never fire.
    pub fn is_triggered_by(&self, price: Decimal, reference: Option<Decimal>) -> bool {
        if !self.props.is_active {
            return false;
        }
        match self.props.alert_type {
            AlertType::PriceAbove => price >= self.props.threshold,
            AlertType::PriceBelow => price <= self.props.threshold,
            AlertType::PercentChange => match reference {
                Some(reference) if reference > Decimal::ZERO => price
                    .checked_sub(reference)
                    .and_then(|delta| delta.checked_div(reference))
                    .and_then(|ratio| ratio.abs().checked_mul(Decimal::ONE_HUNDRED))
                    .map_or(true, |change| change >= self.props.threshold),
                _ => false,
            },
        }
    }

    fn ensure_active(&self) -> Result<(), InvariantViolation> {
        if !self.props.is_active {
            return Err(InvariantViolation::AlertInactive(self.id.to_string()));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.props.updated_at = Some(Utc::now());
    }
}

impl Entity for Alert {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}

fn validate_threshold(threshold: Decimal) -> Result<(), ValidationError> {
    if threshold <= Decimal::ZERO {
        return Err(ValidationError::InvalidAlert(format!(
            "threshold must be greater than zero, got {}",
            threshold
        )));
    }
    Ok(())
}
