//! Portfolio domain entity
//!
//! An investor's single portfolio: its market value and target allocation
//! per asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::domain::value_objects::{Money, Percentage};
use crate::error::{DomainError, InvariantViolation, ValidationError};

const MAX_PORTFOLIO_NAME_LENGTH: usize = 100;

/// Full allocation, with the same tolerance percentages compare with
const FULL_ALLOCATION: f64 = 100.0 + crate::domain::value_objects::percentage::PERCENTAGE_TOLERANCE;

/// Target share of the portfolio for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub asset_id: UniqueEntityId,
    pub target: Percentage,
}

#[derive(Debug, Clone)]
pub struct PortfolioProps {
    pub investor_id: UniqueEntityId,
    pub name: String,
    pub total_value: Money,
    pub allocations: Vec<Allocation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    id: UniqueEntityId,
    props: PortfolioProps,
}

impl Portfolio {
    pub fn create(mut props: PortfolioProps, id: Option<UniqueEntityId>) -> Result<Self, DomainError> {
        props.name = validate_name(&props.name)?;
        for allocation in &props.allocations {
            validate_target(&allocation.target)?;
        }
        let total = sum_targets(props.allocations.iter());
        if total > FULL_ALLOCATION {
            return Err(InvariantViolation::AllocationExceeded(total).into());
        }
        Ok(Self {
            id: UniqueEntityId::or_new(id),
            props,
        })
    }

    pub fn investor_id(&self) -> &UniqueEntityId {
        &self.props.investor_id
    }

    pub fn name(&self) -> &str {
        &self.props.name
    }

    pub fn total_value(&self) -> &Money {
        &self.props.total_value
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.props.allocations
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    pub fn is_owned_by(&self, investor_id: &UniqueEntityId) -> bool {
        &self.props.investor_id == investor_id
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.props.name = validate_name(name)?;
        self.touch();
        Ok(())
    }

    pub fn set_total_value(&mut self, total_value: Money) {
        self.props.total_value = total_value;
        self.touch();
    }

    /// Set the target for an asset, replacing any previous target for it
    pub fn allocate(
        &mut self,
        asset_id: UniqueEntityId,
        target: Percentage,
    ) -> Result<(), DomainError> {
        validate_target(&target)?;

        let others = self
            .props
            .allocations
            .iter()
            .filter(|a| a.asset_id != asset_id);
        let total = sum_targets(others) + target.value();
        if total > FULL_ALLOCATION {
            return Err(InvariantViolation::AllocationExceeded(total).into());
        }

        match self
            .props
            .allocations
            .iter_mut()
            .find(|a| a.asset_id == asset_id)
        {
            Some(existing) => existing.target = target,
            None => self.props.allocations.push(Allocation { asset_id, target }),
        }
        self.touch();
        Ok(())
    }

    /// Returns whether an allocation was removed
    pub fn remove_allocation(&mut self, asset_id: &UniqueEntityId) -> bool {
        let before = self.props.allocations.len();
        self.props.allocations.retain(|a| &a.asset_id != asset_id);
        let removed = self.props.allocations.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn allocated_total(&self) -> Percentage {
        Percentage::create(sum_targets(self.props.allocations.iter()))
            .unwrap_or_else(|_| Percentage::zero())
    }

    fn touch(&mut self) {
        self.props.updated_at = Some(Utc::now());
    }
}

impl Entity for Portfolio {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() || name.chars().count() > MAX_PORTFOLIO_NAME_LENGTH {
        return Err(ValidationError::InvalidPortfolio(format!(
            "name must have between 1 and {} characters",
            MAX_PORTFOLIO_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn validate_target(target: &Percentage) -> Result<(), ValidationError> {
    if target.value() <= 0.0 {
        return Err(ValidationError::InvalidPercentage(format!(
            "allocation target must be positive, got {}",
            target
        )));
    }
    Ok(())
}

fn sum_targets<'a>(allocations: impl Iterator<Item = &'a Allocation>) -> f64 {
    allocations.map(|a| a.target.value()).sum()
}
