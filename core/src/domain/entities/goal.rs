//! Goal domain entity
//!
//! A savings target with an amount to reach by a date. The target amount and
//! date are fixed at creation; progress, status and presentation fields change.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::domain::value_objects::{Money, NegativeBalancePolicy, Percentage};
use crate::error::{DomainError, InvariantViolation, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalPriority::Low => write!(f, "low"),
            GoalPriority::Medium => write!(f, "medium"),
            GoalPriority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(GoalPriority::Low),
            "medium" => Ok(GoalPriority::Medium),
            "high" => Ok(GoalPriority::High),
            _ => Err(format!("Unknown goal priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Active => write!(f, "active"),
            GoalStatus::Completed => write!(f, "completed"),
            GoalStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "cancelled" | "canceled" => Ok(GoalStatus::Cancelled),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoalProps {
    pub investor_id: UniqueEntityId,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Money,
    pub current_amount: Money,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Goal {
    id: UniqueEntityId,
    props: GoalProps,
}

impl Goal {
    /// Build a goal from its props
    ///
    /// The target date is not checked here; `GoalService::create_goal` rejects
    /// past dates before calling this.
    pub fn create(mut props: GoalProps, id: Option<UniqueEntityId>) -> Result<Self, DomainError> {
        props.name = validate_name(&props.name)?;

        if props.target_amount.amount() <= Decimal::ZERO {
            return Err(ValidationError::InvalidGoal(
                "target amount must be greater than zero".to_string(),
            )
            .into());
        }

        if props.current_amount.currency() != props.target_amount.currency() {
            return Err(InvariantViolation::CurrencyMismatch {
                expected: props.target_amount.currency().to_string(),
                found: props.current_amount.currency().to_string(),
            }
            .into());
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

    pub fn description(&self) -> Option<&str> {
        self.props.description.as_deref()
    }

    pub fn target_amount(&self) -> &Money {
        &self.props.target_amount
    }

    pub fn current_amount(&self) -> &Money {
        &self.props.current_amount
    }

    pub fn target_date(&self) -> NaiveDate {
        self.props.target_date
    }

    pub fn priority(&self) -> GoalPriority {
        self.props.priority
    }

    pub fn status(&self) -> GoalStatus {
        self.props.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    pub fn currency(&self) -> &str {
        self.props.target_amount.currency()
    }

    pub fn is_owned_by(&self, investor_id: &UniqueEntityId) -> bool {
        &self.props.investor_id == investor_id
    }

    pub fn is_active(&self) -> bool {
        self.props.status == GoalStatus::Active
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.props.name = validate_name(name)?;
        self.touch();
        Ok(())
    }

    /// Blank descriptions are stored as `None`
    pub fn set_description(&mut self, description: Option<String>) {
        self.props.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.touch();
    }

    pub fn set_priority(&mut self, priority: GoalPriority) {
        self.props.priority = priority;
        self.touch();
    }

    pub fn set_current_amount(&mut self, amount: Money) -> Result<(), InvariantViolation> {
        self.ensure_currency(&amount)?;
        self.props.current_amount = amount;
        self.touch();
        Ok(())
    }

    pub fn contribute(&mut self, amount: &Money) -> Result<(), InvariantViolation> {
        self.ensure_active()?;
        self.props.current_amount = self.props.current_amount.add(amount)?;
        self.touch();
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        amount: &Money,
        policy: NegativeBalancePolicy,
    ) -> Result<(), InvariantViolation> {
        self.ensure_active()?;
        self.props.current_amount = self.props.current_amount.subtract_with(amount, policy)?;
        self.touch();
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), InvariantViolation> {
        self.transition(GoalStatus::Completed)
    }

    pub fn cancel(&mut self) -> Result<(), InvariantViolation> {
        self.transition(GoalStatus::Cancelled)
    }

    pub fn is_reached(&self) -> bool {
        self.props.current_amount.amount() >= self.props.target_amount.amount()
    }

    /// Share of the target already saved, capped at 100%
    pub fn progress(&self) -> Percentage {
        let target = self.props.target_amount.amount();
        let current = self.props.current_amount.amount().max(Decimal::ZERO);
        let ratio = current
            .checked_div(target)
            .unwrap_or(Decimal::ONE)
            .min(Decimal::ONE);
        ratio
            .to_f64()
            .and_then(|r| Percentage::from_decimal(r).ok())
            .unwrap_or_else(Percentage::zero)
    }

    /// What is still missing; zero once the goal is reached
    pub fn remaining(&self) -> Money {
        self.props
            .target_amount
            .subtract(&self.props.current_amount)
            .unwrap_or_else(|_| {
                Money::zero_in(self.currency()).unwrap_or_default()
            })
    }

    fn transition(&mut self, to: GoalStatus) -> Result<(), InvariantViolation> {
        if self.props.status != GoalStatus::Active {
            return Err(InvariantViolation::InvalidStatusTransition {
                from: self.props.status.to_string(),
                to: to.to_string(),
            });
        }
        self.props.status = to;
        self.touch();
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), InvariantViolation> {
        if !self.is_active() {
            return Err(InvariantViolation::GoalNotActive(self.id.to_string()));
        }
        Ok(())
    }

    fn ensure_currency(&self, amount: &Money) -> Result<(), InvariantViolation> {
        if amount.currency() != self.currency() {
            return Err(InvariantViolation::CurrencyMismatch {
                expected: self.currency().to_string(),
                found: amount.currency().to_string(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.props.updated_at = Some(Utc::now());
    }
}

impl Entity for Goal {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidGoal(
            "goal name cannot be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_goal;
    use rust_decimal_macros::dec;

    fn brl(amount: Decimal) -> Money {
        Money::create(amount, None).unwrap()
    }

    #[test]
    fn create_accepts_past_target_date() {
        let mut goal = test_goal(&UniqueEntityId::new());
        goal.props.target_date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(Goal::create(goal.props.clone(), None).is_ok());
    }

    #[test]
    fn create_rejects_zero_target_and_empty_name() {
        let goal = test_goal(&UniqueEntityId::new());

        let mut props = goal.props.clone();
        props.target_amount = brl(dec!(0));
        assert!(Goal::create(props, None).is_err());

        let mut props = goal.props.clone();
        props.target_amount = brl(dec!(0))
            .subtract_with(&brl(dec!(500)), NegativeBalancePolicy::Allow)
            .unwrap();
        assert!(matches!(
            Goal::create(props, None),
            Err(DomainError::Validation(ValidationError::InvalidGoal(_)))
        ));

        let mut props = goal.props.clone();
        props.name = " ".to_string();
        assert!(Goal::create(props, None).is_err());
    }

    #[test]
    fn progress_caps_when_ratio_overflows() {
        let mut props = test_goal(&UniqueEntityId::new()).props;
        props.target_amount = brl(dec!(0.0000000000000000000000000001));
        props.current_amount = brl(dec!(1_000_000));
        let goal = Goal::create(props, None).unwrap();
        assert_eq!(goal.progress().value(), 100.0);
    }

    #[test]
    fn contribute_and_withdraw() {
        let mut goal = test_goal(&UniqueEntityId::new());
        goal.contribute(&brl(dec!(300))).unwrap();
        goal.withdraw(&brl(dec!(100)), NegativeBalancePolicy::Disallow)
            .unwrap();
        assert_eq!(goal.current_amount(), &brl(dec!(200)));
        assert!(goal.updated_at().is_some());
    }

    #[test]
    fn withdraw_respects_policy() {
        let mut goal = test_goal(&UniqueEntityId::new());
        goal.contribute(&brl(dec!(50))).unwrap();

        let err = goal
            .withdraw(&brl(dec!(80)), NegativeBalancePolicy::Disallow)
            .unwrap_err();
        assert!(matches!(err, InvariantViolation::NegativeBalance { .. }));
        assert_eq!(goal.current_amount(), &brl(dec!(50)));

        goal.withdraw(&brl(dec!(80)), NegativeBalancePolicy::Allow)
            .unwrap();
        assert!(goal.current_amount().is_negative());
        assert_eq!(goal.progress(), Percentage::zero());
    }

    #[test]
    fn progress_and_remaining() {
        let mut goal = test_goal(&UniqueEntityId::new());
        // target is 10_000 BRL
        goal.contribute(&brl(dec!(2500))).unwrap();
        assert_eq!(goal.progress(), Percentage::create(25.0).unwrap());
        assert_eq!(goal.remaining(), brl(dec!(7500)));
        assert!(!goal.is_reached());

        goal.contribute(&brl(dec!(9000))).unwrap();
        assert!(goal.is_reached());
        assert_eq!(goal.progress(), Percentage::create(100.0).unwrap());
        assert!(goal.remaining().is_zero());
    }

    #[test]
    fn status_transitions_only_from_active() {
        let mut goal = test_goal(&UniqueEntityId::new());
        goal.complete().unwrap();
        assert_eq!(goal.status(), GoalStatus::Completed);

        let err = goal.cancel().unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::InvalidStatusTransition {
                from: "completed".to_string(),
                to: "cancelled".to_string(),
            }
        );
        assert!(matches!(
            goal.contribute(&brl(dec!(1))),
            Err(InvariantViolation::GoalNotActive(_))
        ));
    }

    #[test]
    fn setters_replace_fields() {
        let mut goal = test_goal(&UniqueEntityId::new());
        goal.rename("Casa própria").unwrap();
        goal.set_description(Some("  entrada do apartamento ".to_string()));
        goal.set_priority(GoalPriority::High);
        goal.set_current_amount(brl(dec!(1234))).unwrap();

        assert_eq!(goal.name(), "Casa própria");
        assert_eq!(goal.description(), Some("entrada do apartamento"));
        assert_eq!(goal.priority(), GoalPriority::High);
        assert_eq!(goal.current_amount(), &brl(dec!(1234)));

        goal.set_description(Some("   ".to_string()));
        assert_eq!(goal.description(), None);
        assert!(goal
            .set_current_amount(Money::create(dec!(1), Some("USD")).unwrap())
            .is_err());
    }
}
