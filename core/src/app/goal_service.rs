//! Goal service
//!
//! Savings goals of an investor: creation, edits, contributions and
//! projections. Reaching a goal through a contribution notifies its owner.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use super::goal_projection::{self, GoalProjection};
use crate::config::ScenarioContributions;
use crate::domain::entities::{
    Entity, Goal, GoalPriority, GoalProps, GoalStatus, Notification, NotificationProps,
    NotificationType, UniqueEntityId,
};
use crate::domain::ports::{GoalRepository, InvestorRepository, NotificationRepository};
use crate::domain::value_objects::{Money, NegativeBalancePolicy};
use crate::error::{AppError, ValidationError};

#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    /// Falls back to the configured default currency
    pub currency: Option<String>,
    pub target_date: NaiveDate,
    pub priority: Option<GoalPriority>,
}

/// Goal fields to change; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct EditGoal {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub priority: Option<GoalPriority>,
    pub current_amount: Option<Decimal>,
}

/// Service for managing goals
pub struct GoalService<GR, IR, NR>
where
    GR: GoalRepository,
    IR: InvestorRepository,
    NR: NotificationRepository,
{
    goals: Arc<GR>,
    investors: Arc<IR>,
    notifications: Arc<NR>,
    default_currency: String,
    negative_balance_policy: NegativeBalancePolicy,
    contributions: ScenarioContributions,
}

impl<GR, IR, NR> GoalService<GR, IR, NR>
where
    GR: GoalRepository,
    IR: InvestorRepository,
    NR: NotificationRepository,
{
    pub fn new(
        goals: Arc<GR>,
        investors: Arc<IR>,
        notifications: Arc<NR>,
        default_currency: String,
        negative_balance_policy: NegativeBalancePolicy,
        contributions: ScenarioContributions,
    ) -> Self {
        Self {
            goals,
            investors,
            notifications,
            default_currency,
            negative_balance_policy,
            contributions,
        }
    }

    pub async fn create_goal(
        &self,
        investor_id: &UniqueEntityId,
        input: CreateGoal,
    ) -> Result<Goal, AppError> {
        self.create_goal_on(investor_id, input, Utc::now().date_naive())
            .await
    }

    /// Create a goal as of `today`
    ///
    /// Checks run in this order: the target date must be after `today`, the
    /// investor must exist, then the goal itself is validated.
    pub async fn create_goal_on(
        &self,
        investor_id: &UniqueEntityId,
        input: CreateGoal,
        today: NaiveDate,
    ) -> Result<Goal, AppError> {
        if input.target_date <= today {
            tracing::warn!(
                investor_id = %investor_id,
                target_date = %input.target_date,
                "Goal rejected: target date is not in the future"
            );
            return Err(ValidationError::InvalidGoal(format!(
                "target date {} must be in the future",
                input.target_date
            ))
            .into());
        }

        if self.investors.find_by_id(investor_id).await?.is_none() {
            return Err(AppError::ResourceNotFound(format!("Investor {}", investor_id)));
        }

        let currency = input.currency.as_deref().unwrap_or(&self.default_currency);
        let goal = Goal::create(
            GoalProps {
                investor_id: investor_id.clone(),
                name: input.name,
                description: input.description,
                target_amount: Money::create(input.target_amount, Some(currency))?,
                current_amount: Money::zero_in(currency)?,
                target_date: input.target_date,
                priority: input.priority.unwrap_or_default(),
                status: GoalStatus::Active,
                created_at: Utc::now(),
                updated_at: None,
            },
            None,
        )?;

        self.goals.create(&goal).await?;

        tracing::info!(
            goal_id = %goal.id(),
            investor_id = %investor_id,
            target = %goal.target_amount(),
            "Goal created"
        );

        Ok(goal)
    }

    pub async fn edit_goal(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
        edit: EditGoal,
    ) -> Result<Goal, AppError> {
        let mut goal = self.owned(investor_id, goal_id).await?;

        if let Some(name) = edit.name {
            goal.rename(&name)?;
        }
        if let Some(description) = edit.description {
            goal.set_description(description);
        }
        if let Some(priority) = edit.priority {
            goal.set_priority(priority);
        }
        if let Some(amount) = edit.current_amount {
            let amount = Money::create(amount, Some(goal.currency()))?;
            goal.set_current_amount(amount)?;
        }

        self.goals.update(&goal).await?;
        Ok(goal)
    }

    /// Add to the saved amount; the first time the target is met the owner is notified
    pub async fn contribute(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
        amount: Decimal,
    ) -> Result<Goal, AppError> {
        let mut goal = self.owned(investor_id, goal_id).await?;
        let amount = Money::create(amount, Some(goal.currency()))?;
        let was_reached = goal.is_reached();

        goal.contribute(&amount)?;
        let reached = if !was_reached && goal.is_reached() {
            Some(reached_notification(&goal)?)
        } else {
            None
        };
        self.goals.update(&goal).await?;

        tracing::info!(goal_id = %goal_id, amount = %amount, "Goal contribution");

        // The contribution is saved; a lost notification must not fail it
        if let Some(notification) = reached {
            match self.notifications.create(&notification).await {
                Ok(()) => {
                    tracing::debug!(goal_id = %goal_id, "Goal reached notification created")
                }
                Err(e) => tracing::warn!(
                    goal_id = %goal_id,
                    error = %e,
                    "Failed to create goal reached notification"
                ),
            }
        }

        Ok(goal)
    }

    /// Take from the saved amount under the configured negative-balance policy
    pub async fn withdraw(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
        amount: Decimal,
    ) -> Result<Goal, AppError> {
        let mut goal = self.owned(investor_id, goal_id).await?;
        let amount = Money::create(amount, Some(goal.currency()))?;

        if let Err(e) = goal.withdraw(&amount, self.negative_balance_policy) {
            tracing::warn!(goal_id = %goal_id, error = %e, "Goal withdrawal rejected");
            return Err(e.into());
        }
        self.goals.update(&goal).await?;

        tracing::info!(goal_id = %goal_id, amount = %amount, "Goal withdrawal");

        Ok(goal)
    }

    pub async fn complete(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
    ) -> Result<Goal, AppError> {
        let mut goal = self.owned(investor_id, goal_id).await?;
        goal.complete()?;
        self.goals.update(&goal).await?;
        tracing::info!(goal_id = %goal_id, "Goal completed");
        Ok(goal)
    }

    pub async fn cancel(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
    ) -> Result<Goal, AppError> {
        let mut goal = self.owned(investor_id, goal_id).await?;
        goal.cancel()?;
        self.goals.update(&goal).await?;
        tracing::info!(goal_id = %goal_id, "Goal cancelled");
        Ok(goal)
    }

    pub async fn delete_goal(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
    ) -> Result<(), AppError> {
        self.owned(investor_id, goal_id).await?;
        self.goals.delete(goal_id).await?;
        tracing::info!(goal_id = %goal_id, "Goal deleted");
        Ok(())
    }

    /// Goals of an investor, highest priority first, then nearest target date
    pub async fn list_goals(&self, investor_id: &UniqueEntityId) -> Result<Vec<Goal>, AppError> {
        let mut goals = self.goals.find_many_by_investor(investor_id).await?;
        goals.sort_by(|a, b| {
            priority_rank(b.priority())
                .cmp(&priority_rank(a.priority()))
                .then(a.target_date().cmp(&b.target_date()))
        });
        Ok(goals)
    }

    pub async fn project_goal(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
    ) -> Result<GoalProjection, AppError> {
        let goal = self.owned(investor_id, goal_id).await?;
        Ok(goal_projection::project(
            &goal,
            &self.contributions,
            Utc::now().date_naive(),
        )?)
    }

    async fn owned(
        &self,
        investor_id: &UniqueEntityId,
        goal_id: &UniqueEntityId,
    ) -> Result<Goal, AppError> {
        let goal = self
            .goals
            .find_by_id(goal_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Goal {}", goal_id)))?;

        if !goal.is_owned_by(investor_id) {
            tracing::warn!(goal_id = %goal_id, investor_id = %investor_id, "Goal access denied");
            return Err(AppError::NotAllowed(
                "Goal belongs to another investor".to_string(),
            ));
        }

        Ok(goal)
    }
}

fn reached_notification(goal: &Goal) -> Result<Notification, ValidationError> {
    Notification::create(
        NotificationProps {
            user_id: goal.investor_id().clone(),
            kind: NotificationType::Goal,
            title: format!("Goal reached: {}", goal.name()),
            message: format!(
                "You saved {} of your {} target",
                goal.current_amount(),
                goal.target_amount()
            ),
            is_read: false,
            created_at: Utc::now(),
            read_at: None,
        },
        None,
    )
}

fn priority_rank(priority: GoalPriority) -> u8 {
    match priority {
        GoalPriority::Low => 0,
        GoalPriority::Medium => 1,
        GoalPriority::High => 2,
    }
}
