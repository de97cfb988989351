use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::MoneyView;
use crate::app::goal_projection::{GoalProjection, ScenarioKind};
use crate::domain::entities::{Entity, Goal, GoalPriority, GoalStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    pub id: String,
    pub investor_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: MoneyView,
    pub current_amount: MoneyView,
    pub progress_percentage: f64,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioView {
    pub kind: ScenarioKind,
    pub label: String,
    pub monthly_contribution: MoneyView,
    pub months_to_target: Option<u32>,
    pub projected_completion: Option<NaiveDate>,
    pub reaches_by_target_date: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjectionView {
    pub goal_id: String,
    pub remaining: MoneyView,
    pub target_date: NaiveDate,
    pub scenarios: Vec<ScenarioView>,
}

pub fn present(goal: &Goal) -> GoalView {
    GoalView {
        id: goal.id().to_string(),
        investor_id: goal.investor_id().to_string(),
        name: goal.name().to_string(),
        description: goal.description().map(str::to_string),
        target_amount: goal.target_amount().into(),
        current_amount: goal.current_amount().into(),
        progress_percentage: goal.progress().value(),
        target_date: goal.target_date(),
        priority: goal.priority(),
        status: goal.status(),
        created_at: goal.created_at(),
        updated_at: goal.updated_at(),
    }
}

pub fn present_projection(projection: &GoalProjection) -> GoalProjectionView {
    GoalProjectionView {
        goal_id: projection.goal_id.to_string(),
        remaining: (&projection.remaining).into(),
        target_date: projection.target_date,
        scenarios: projection
            .scenarios
            .iter()
            .map(|s| ScenarioView {
                kind: s.kind,
                label: s.label.clone(),
                monthly_contribution: (&s.monthly_contribution).into(),
                months_to_target: s.months_to_target,
                projected_completion: s.projected_completion,
                reaches_by_target_date: s.reaches_by_target_date,
            })
            .collect(),
    }
}
