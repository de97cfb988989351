//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Alert, Asset, Entity, Goal, Investment, Investor, Notification, Portfolio, Transaction,
    UniqueEntityId,
};
use crate::domain::ports::{
    AlertRepository, AssetRepository, GoalRepository, InvestmentRepository, InvestorRepository,
    NotificationRepository, PaginationParams, PasswordHasher, PortfolioRepository,
    TransactionRepository,
};
use crate::error::DomainError;

type Store<T> = Arc<RwLock<HashMap<UniqueEntityId, T>>>;

fn insert<T: Entity + Clone>(store: &Store<T>, entity: &T) {
    store
        .write()
        .unwrap()
        .insert(entity.id().clone(), entity.clone());
}

/// Fail like a real store would on a missing row
fn replace<T: Entity + Clone>(store: &Store<T>, entity: &T, what: &str) -> Result<(), DomainError> {
    let mut items = store.write().unwrap();
    match items.get_mut(entity.id()) {
        Some(existing) => {
            *existing = entity.clone();
            Ok(())
        }
        None => Err(DomainError::NotFound(format!("{} {}", what, entity.id()))),
    }
}

// ============================================================================
// In-Memory Investor Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryInvestorRepository {
    investors: Store<Investor>,
}

impl InMemoryInvestorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an investor for testing
    pub fn with_investor(self, investor: Investor) -> Self {
        insert(&self.investors, &investor);
        self
    }

    pub fn count(&self) -> usize {
        self.investors.read().unwrap().len()
    }
}

#[async_trait]
impl InvestorRepository for InMemoryInvestorRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Investor>, DomainError> {
        Ok(self.investors.read().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Investor>, DomainError> {
        let investors = self.investors.read().unwrap();
        Ok(investors
            .values()
            .find(|i| i.email().value() == email)
            .cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Investor>, DomainError> {
        let investors = self.investors.read().unwrap();
        Ok(investors.values().find(|i| i.cpf().value() == cpf).cloned())
    }

    async fn create(&self, investor: &Investor) -> Result<(), DomainError> {
        insert(&self.investors, investor);
        Ok(())
    }

    async fn update(&self, investor: &Investor) -> Result<(), DomainError> {
        replace(&self.investors, investor, "investor")
    }

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError> {
        self.investors.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Portfolio Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPortfolioRepository {
    portfolios: Store<Portfolio>,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_portfolio(self, portfolio: Portfolio) -> Self {
        insert(&self.portfolios, &portfolio);
        self
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Portfolio>, DomainError> {
        Ok(self.portfolios.read().unwrap().get(id).cloned())
    }

    async fn find_by_investor_id(
        &self,
        investor_id: &UniqueEntityId,
    ) -> Result<Option<Portfolio>, DomainError> {
        let portfolios = self.portfolios.read().unwrap();
        Ok(portfolios
            .values()
            .find(|p| p.is_owned_by(investor_id))
            .cloned())
    }

    async fn create(&self, portfolio: &Portfolio) -> Result<(), DomainError> {
        insert(&self.portfolios, portfolio);
        Ok(())
    }

    async fn update(&self, portfolio: &Portfolio) -> Result<(), DomainError> {
        replace(&self.portfolios, portfolio, "portfolio")
    }

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError> {
        self.portfolios.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Asset Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAssetRepository {
    assets: Store<Asset>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(self, asset: Asset) -> Self {
        insert(&self.assets, &asset);
        self
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Asset>, DomainError> {
        Ok(self.assets.read().unwrap().get(id).cloned())
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Asset>, DomainError> {
        let assets = self.assets.read().unwrap();
        Ok(assets.values().find(|a| a.symbol() == symbol).cloned())
    }

    async fn create(&self, asset: &Asset) -> Result<(), DomainError> {
        insert(&self.assets, asset);
        Ok(())
    }
}

// ============================================================================
// In-Memory Investment Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryInvestmentRepository {
    investments: Store<Investment>,
}

impl InMemoryInvestmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_investment(self, investment: Investment) -> Self {
        insert(&self.investments, &investment);
        self
    }
}

#[async_trait]
impl InvestmentRepository for InMemoryInvestmentRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Investment>, DomainError> {
        Ok(self.investments.read().unwrap().get(id).cloned())
    }

    async fn find_by_portfolio_and_asset(
        &self,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
    ) -> Result<Option<Investment>, DomainError> {
        let investments = self.investments.read().unwrap();
        Ok(investments
            .values()
            .find(|i| i.portfolio_id() == portfolio_id && i.asset_id() == asset_id)
            .cloned())
    }

    async fn find_many_by_portfolio(
        &self,
        portfolio_id: &UniqueEntityId,
    ) -> Result<Vec<Investment>, DomainError> {
        let investments = self.investments.read().unwrap();
        Ok(investments
            .values()
            .filter(|i| i.portfolio_id() == portfolio_id)
            .cloned()
            .collect())
    }

    async fn create(&self, investment: &Investment) -> Result<(), DomainError> {
        insert(&self.investments, investment);
        Ok(())
    }

    async fn update(&self, investment: &Investment) -> Result<(), DomainError> {
        replace(&self.investments, investment, "investment")
    }

    async fn delete_many_by_portfolio(
        &self,
        portfolio_id: &UniqueEntityId,
    ) -> Result<(), DomainError> {
        self.investments
            .write()
            .unwrap()
            .retain(|_, i| i.portfolio_id() != portfolio_id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Transaction Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    transactions: Store<Transaction>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(self, transaction: Transaction) -> Self {
        insert(&self.transactions, &transaction);
        self
    }

    pub fn count(&self) -> usize {
        self.transactions.read().unwrap().len()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Transaction>, DomainError> {
        Ok(self.transactions.read().unwrap().get(id).cloned())
    }

    async fn find_many_by_portfolio_and_asset(
        &self,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
        params: &PaginationParams,
    ) -> Result<Vec<Transaction>, DomainError> {
        let transactions = self.transactions.read().unwrap();
        let mut matching: Vec<Transaction> = transactions
            .values()
            .filter(|t| t.portfolio_id() == portfolio_id && t.asset_id() == asset_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date_at().cmp(&a.date_at()));
        Ok(matching
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect())
    }

    async fn create(&self, transaction: &Transaction) -> Result<(), DomainError> {
        insert(&self.transactions, transaction);
        Ok(())
    }

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError> {
        self.transactions.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Goal Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: Store<Goal>,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goal(self, goal: Goal) -> Self {
        insert(&self.goals, &goal);
        self
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Goal>, DomainError> {
        Ok(self.goals.read().unwrap().get(id).cloned())
    }

    async fn find_many_by_investor(
        &self,
        investor_id: &UniqueEntityId,
    ) -> Result<Vec<Goal>, DomainError> {
        let goals = self.goals.read().unwrap();
        Ok(goals
            .values()
            .filter(|g| g.is_owned_by(investor_id))
            .cloned()
            .collect())
    }

    async fn create(&self, goal: &Goal) -> Result<(), DomainError> {
        insert(&self.goals, goal);
        Ok(())
    }

    async fn update(&self, goal: &Goal) -> Result<(), DomainError> {
        replace(&self.goals, goal, "goal")
    }

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError> {
        self.goals.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Alert Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAlertRepository {
    alerts: Store<Alert>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(self, alert: Alert) -> Self {
        insert(&self.alerts, &alert);
        self
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Alert>, DomainError> {
        Ok(self.alerts.read().unwrap().get(id).cloned())
    }

    async fn find_many_by_user(
        &self,
        user_id: &UniqueEntityId,
    ) -> Result<Vec<Alert>, DomainError> {
        let alerts = self.alerts.read().unwrap();
        Ok(alerts
            .values()
            .filter(|a| a.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn find_active_by_asset(
        &self,
        asset_id: &UniqueEntityId,
    ) -> Result<Vec<Alert>, DomainError> {
        let alerts = self.alerts.read().unwrap();
        Ok(alerts
            .values()
            .filter(|a| a.asset_id() == asset_id && a.is_active())
            .cloned()
            .collect())
    }

    async fn create(&self, alert: &Alert) -> Result<(), DomainError> {
        insert(&self.alerts, alert);
        Ok(())
    }

    async fn update(&self, alert: &Alert) -> Result<(), DomainError> {
        replace(&self.alerts, alert, "alert")
    }

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError> {
        self.alerts.write().unwrap().remove(id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Notification Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: Store<Notification>,
    fail_writes: bool,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `create` fails with a database error
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_notification(self, notification: Notification) -> Self {
        insert(&self.notifications, &notification);
        self
    }

    /// Every stored notification, read or not
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.read().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_by_id(
        &self,
        id: &UniqueEntityId,
    ) -> Result<Option<Notification>, DomainError> {
        Ok(self.notifications.read().unwrap().get(id).cloned())
    }

    async fn find_many_unread_by_user(
        &self,
        user_id: &UniqueEntityId,
    ) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().unwrap();
        let mut unread: Vec<Notification> = notifications
            .values()
            .filter(|n| n.is_owned_by(user_id) && !n.is_read())
            .cloned()
            .collect();
        unread.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(unread)
    }

    async fn create(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Database("notification store unavailable".to_string()));
        }
        insert(&self.notifications, notification);
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        replace(&self.notifications, notification, "notification")
    }
}

// ============================================================================
// Fake Password Hasher
// ============================================================================

/// Deterministic hasher: `hashed:<plain>`
#[derive(Default)]
pub struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", plain))
    }

    fn compare(&self, plain: &str, hashed: &str) -> Result<bool, DomainError> {
        Ok(hashed == format!("hashed:{}", plain))
    }
}
