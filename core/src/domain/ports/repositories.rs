//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Lookups return `Ok(None)` when nothing matches; storage failures surface as
//! `DomainError::Database`.

use async_trait::async_trait;

use crate::domain::entities::{
    Alert, Asset, Goal, Investment, Investor, Notification, Portfolio, Transaction,
    UniqueEntityId,
};
use crate::error::DomainError;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub per_page: u32,
}

impl PaginationParams {
    /// Clamp to page >= 1 and 1 <= per_page <= `max_per_page`
    pub fn new(page: u32, per_page: u32, max_per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, max_per_page.max(1)),
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

/// Repository for Investor aggregates
#[async_trait]
pub trait InvestorRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Investor>, DomainError>;

    /// Find an investor by normalized (lower-cased) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Investor>, DomainError>;

    /// Find an investor by CPF digits
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Investor>, DomainError>;

    async fn create(&self, investor: &Investor) -> Result<(), DomainError>;

    async fn update(&self, investor: &Investor) -> Result<(), DomainError>;

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError>;
}

/// Repository for Portfolio aggregates
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Portfolio>, DomainError>;

    async fn find_by_investor_id(
        &self,
        investor_id: &UniqueEntityId,
    ) -> Result<Option<Portfolio>, DomainError>;

    async fn create(&self, portfolio: &Portfolio) -> Result<(), DomainError>;

    async fn update(&self, portfolio: &Portfolio) -> Result<(), DomainError>;

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError>;
}

/// Repository for Asset aggregates
#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Asset>, DomainError>;

    /// Find an asset by its upper-cased ticker symbol
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Asset>, DomainError>;

    async fn create(&self, asset: &Asset) -> Result<(), DomainError>;
}

/// Repository for Investment aggregates (one per portfolio and asset)
#[async_trait]
pub trait InvestmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Investment>, DomainError>;

    async fn find_by_portfolio_and_asset(
        &self,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
    ) -> Result<Option<Investment>, DomainError>;

    async fn find_many_by_portfolio(
        &self,
        portfolio_id: &UniqueEntityId,
    ) -> Result<Vec<Investment>, DomainError>;

    async fn create(&self, investment: &Investment) -> Result<(), DomainError>;

    async fn update(&self, investment: &Investment) -> Result<(), DomainError>;

    /// Remove every investment of a portfolio
    async fn delete_many_by_portfolio(&self, portfolio_id: &UniqueEntityId)
        -> Result<(), DomainError>;
}

/// Repository for Transaction records
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Transaction>, DomainError>;

    /// Transactions of one asset in one portfolio, most recent `date_at` first
    async fn find_many_by_portfolio_and_asset(
        &self,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
        params: &PaginationParams,
    ) -> Result<Vec<Transaction>, DomainError>;

    async fn create(&self, transaction: &Transaction) -> Result<(), DomainError>;

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError>;
}

/// Repository for Goal aggregates
#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Goal>, DomainError>;

    async fn find_many_by_investor(
        &self,
        investor_id: &UniqueEntityId,
    ) -> Result<Vec<Goal>, DomainError>;

    async fn create(&self, goal: &Goal) -> Result<(), DomainError>;

    async fn update(&self, goal: &Goal) -> Result<(), DomainError>;

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError>;
}

/// Repository for Alert aggregates
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Alert>, DomainError>;

    async fn find_many_by_user(&self, user_id: &UniqueEntityId)
        -> Result<Vec<Alert>, DomainError>;

    /// Active alerts watching an asset
    async fn find_active_by_asset(
        &self,
        asset_id: &UniqueEntityId,
    ) -> Result<Vec<Alert>, DomainError>;

    async fn create(&self, alert: &Alert) -> Result<(), DomainError>;

    async fn update(&self, alert: &Alert) -> Result<(), DomainError>;

    async fn delete(&self, id: &UniqueEntityId) -> Result<(), DomainError>;
}

/// Repository for Notification records
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: &UniqueEntityId)
        -> Result<Option<Notification>, DomainError>;

    /// Unread notifications of a user, newest first
    async fn find_many_unread_by_user(
        &self,
        user_id: &UniqueEntityId,
    ) -> Result<Vec<Notification>, DomainError>;

    async fn create(&self, notification: &Notification) -> Result<(), DomainError>;

    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_and_computes_offset() {
        let params = PaginationParams::new(0, 500, 100);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 100);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams::new(3, 20, 100);
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }
}
