//! Goal projection
//!
//! Three fixed monthly-contribution scenarios for reaching a goal, each
//! reporting how many months it takes and whether that beats the target date.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ScenarioContributions;
use crate::domain::entities::{Entity, Goal, UniqueEntityId};
use crate::domain::value_objects::Money;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Conservative,
    Moderate,
    Aggressive,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Conservative,
        ScenarioKind::Moderate,
        ScenarioKind::Aggressive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Conservative => "Conservative",
            ScenarioKind::Moderate => "Moderate",
            ScenarioKind::Aggressive => "Aggressive",
        }
    }

    fn monthly(&self, contributions: &ScenarioContributions) -> Decimal {
        match self {
            ScenarioKind::Conservative => contributions.conservative,
            ScenarioKind::Moderate => contributions.moderate,
            ScenarioKind::Aggressive => contributions.aggressive,
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionScenario {
    pub kind: ScenarioKind,
    pub label: String,
    pub monthly_contribution: Money,
    /// `None` when the contribution is zero and the goal is not yet reached
    pub months_to_target: Option<u32>,
    pub projected_completion: Option<NaiveDate>,
    pub reaches_by_target_date: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProjection {
    pub goal_id: UniqueEntityId,
    pub remaining: Money,
    pub target_date: NaiveDate,
    pub scenarios: Vec<ContributionScenario>,
}

/// Build the three scenarios for `goal` as seen on `today`
pub fn project(
    goal: &Goal,
    contributions: &ScenarioContributions,
    today: NaiveDate,
) -> Result<GoalProjection, ValidationError> {
    let remaining = goal.remaining();

    let scenarios = ScenarioKind::ALL
        .iter()
        .map(|kind| {
            let monthly_contribution =
                Money::create(kind.monthly(contributions), Some(goal.currency()))?;
            let months_to_target = months_needed(remaining.amount(), monthly_contribution.amount());
            let projected_completion = months_to_target.map(|months| {
                today
                    .checked_add_months(Months::new(months))
                    .unwrap_or(NaiveDate::MAX)
            });
            let reaches_by_target_date = projected_completion
                .map(|date| date <= goal.target_date())
                .unwrap_or(false);

            Ok(ContributionScenario {
                kind: *kind,
                label: kind.label().to_string(),
                monthly_contribution,
                months_to_target,
                projected_completion,
                reaches_by_target_date,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(GoalProjection {
        goal_id: goal.id().clone(),
        remaining,
        target_date: goal.target_date(),
        scenarios,
    })
}

fn months_needed(remaining: Decimal, monthly: Decimal) -> Option<u32> {
    if remaining <= Decimal::ZERO {
        return Some(0);
    }
    if monthly <= Decimal::ZERO {
        return None;
    }
    let months = remaining
        .checked_div(monthly)
        .and_then(|months| months.ceil().to_u32())
        .unwrap_or(u32::MAX);
    Some(months)
}
