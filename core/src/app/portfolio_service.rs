//! Portfolio service
//!
//! One portfolio per investor: creation, renaming, target allocations and
//! valuation from the investments it holds.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{Entity, Investment, Portfolio, PortfolioProps, UniqueEntityId};
use crate::domain::ports::{InvestmentRepository, InvestorRepository, PortfolioRepository};
use crate::domain::value_objects::{Money, Percentage};
use crate::error::AppError;

/// Sum of the market values of `investments`, in `currency`
pub(crate) fn sum_market_values(
    investments: &[Investment],
    currency: &str,
) -> Result<Money, AppError> {
    let zero = Money::zero_in(currency)?;
    let total = investments
        .iter()
        .try_fold(zero, |acc, i| acc.add(&i.market_value()?))?;
    Ok(total)
}

/// Service for managing portfolios
pub struct PortfolioService<PR, IR, INV>
where
    PR: PortfolioRepository,
    IR: InvestorRepository,
    INV: InvestmentRepository,
{
    portfolios: Arc<PR>,
    investors: Arc<IR>,
    investments: Arc<INV>,
    default_currency: String,
}

impl<PR, IR, INV> PortfolioService<PR, IR, INV>
where
    PR: PortfolioRepository,
    IR: InvestorRepository,
    INV: InvestmentRepository,
{
    pub fn new(
        portfolios: Arc<PR>,
        investors: Arc<IR>,
        investments: Arc<INV>,
        default_currency: String,
    ) -> Self {
        Self {
            portfolios,
            investors,
            investments,
            default_currency,
        }
    }

    /// Create the investor's portfolio, valued at zero
    pub async fn create_portfolio(
        &self,
        investor_id: &UniqueEntityId,
        name: &str,
        currency: Option<&str>,
    ) -> Result<Portfolio, AppError> {
        if self.investors.find_by_id(investor_id).await?.is_none() {
            return Err(AppError::ResourceNotFound(format!("Investor {}", investor_id)));
        }

        if self
            .portfolios
            .find_by_investor_id(investor_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Investor {} already has a portfolio",
                investor_id
            )));
        }

        let currency = currency.unwrap_or(&self.default_currency);
        let portfolio = Portfolio::create(
            PortfolioProps {
                investor_id: investor_id.clone(),
                name: name.to_string(),
                total_value: Money::zero_in(currency)?,
                allocations: Vec::new(),
                created_at: Utc::now(),
                updated_at: None,
            },
            None,
        )?;

        self.portfolios.create(&portfolio).await?;

        tracing::info!(
            portfolio_id = %portfolio.id(),
            investor_id = %investor_id,
            "Portfolio created"
        );

        Ok(portfolio)
    }

    pub async fn get_by_investor(
        &self,
        investor_id: &UniqueEntityId,
    ) -> Result<Portfolio, AppError> {
        self.portfolios
            .find_by_investor_id(investor_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Portfolio of investor {}", investor_id))
            })
    }

    pub async fn rename(
        &self,
        investor_id: &UniqueEntityId,
        portfolio_id: &UniqueEntityId,
        name: &str,
    ) -> Result<Portfolio, AppError> {
        let mut portfolio = self.owned(investor_id, portfolio_id).await?;
        portfolio.rename(name)?;
        self.portfolios.update(&portfolio).await?;
        Ok(portfolio)
    }

    /// Set an asset's target share; all targets together stay within 100%
    pub async fn add_allocation(
        &self,
        investor_id: &UniqueEntityId,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
        target: f64,
    ) -> Result<Portfolio, AppError> {
        let mut portfolio = self.owned(investor_id, portfolio_id).await?;
        let target = Percentage::create(target)?;

        if let Err(e) = portfolio.allocate(asset_id.clone(), target) {
            tracing::warn!(portfolio_id = %portfolio_id, error = %e, "Allocation rejected");
            return Err(e.into());
        }

        self.portfolios.update(&portfolio).await?;

        tracing::info!(
            portfolio_id = %portfolio_id,
            asset_id = %asset_id,
            target = %target,
            "Allocation set"
        );

        Ok(portfolio)
    }

    pub async fn remove_allocation(
        &self,
        investor_id: &UniqueEntityId,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
    ) -> Result<Portfolio, AppError> {
        let mut portfolio = self.owned(investor_id, portfolio_id).await?;
        if !portfolio.remove_allocation(asset_id) {
            return Err(AppError::ResourceNotFound(format!(
                "Allocation for asset {}",
                asset_id
            )));
        }
        self.portfolios.update(&portfolio).await?;
        Ok(portfolio)
    }

    /// Recompute the total value from the portfolio's investments
    pub async fn refresh_total_value(
        &self,
        portfolio_id: &UniqueEntityId,
    ) -> Result<Portfolio, AppError> {
        let mut portfolio = self
            .portfolios
            .find_by_id(portfolio_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Portfolio {}", portfolio_id)))?;

        let investments = self.investments.find_many_by_portfolio(portfolio_id).await?;
        let total = sum_market_values(&investments, portfolio.total_value().currency())?;

        tracing::debug!(
            portfolio_id = %portfolio_id,
            investments = investments.len(),
            total = %total,
            "Portfolio value refreshed"
        );

        portfolio.set_total_value(total);
        self.portfolios.update(&portfolio).await?;
        Ok(portfolio)
    }

    /// Delete the portfolio together with its investments
    pub async fn delete(
        &self,
        investor_id: &UniqueEntityId,
        portfolio_id: &UniqueEntityId,
    ) -> Result<(), AppError> {
        self.owned(investor_id, portfolio_id).await?;
        self.investments.delete_many_by_portfolio(portfolio_id).await?;
        self.portfolios.delete(portfolio_id).await?;

        tracing::info!(portfolio_id = %portfolio_id, "Portfolio deleted");

        Ok(())
    }

    async fn owned(
        &self,
        investor_id: &UniqueEntityId,
        portfolio_id: &UniqueEntityId,
    ) -> Result<Portfolio, AppError> {
        let portfolio = self
            .portfolios
            .find_by_id(portfolio_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Portfolio {}", portfolio_id)))?;

        if !portfolio.is_owned_by(investor_id) {
            tracing::warn!(
                portfolio_id = %portfolio_id,
                investor_id = %investor_id,
                "Portfolio access denied"
            );
            return Err(AppError::NotAllowed(
                "Portfolio belongs to another investor".to_string(),
            ));
        }

        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvariantViolation;
    use crate::domain::entities::{Transaction, TransactionType};
    use crate::test_utils::{
        brl, test_investor, test_portfolio, transaction_props, InMemoryInvestmentRepository,
        InMemoryInvestorRepository, InMemoryPortfolioRepository,
    };
    use rust_decimal_macros::dec;

    type Service = PortfolioService<
        InMemoryPortfolioRepository,
        InMemoryInvestorRepository,
        InMemoryInvestmentRepository,
    >;

    fn create_service(
        portfolios: InMemoryPortfolioRepository,
        investors: InMemoryInvestorRepository,
        investments: InMemoryInvestmentRepository,
    ) -> Service {
        PortfolioService::new(
            Arc::new(portfolios),
            Arc::new(investors),
            Arc::new(investments),
            "BRL".to_string(),
        )
    }

    #[tokio::test]
    async fn create_portfolio_once_per_investor() {
        let investor = test_investor();
        let service = create_service(
            InMemoryPortfolioRepository::new(),
            InMemoryInvestorRepository::new().with_investor(investor.clone()),
            InMemoryInvestmentRepository::new(),
        );

        let portfolio = service
            .create_portfolio(investor.id(), "Aposentadoria", None)
            .await
            .unwrap();
        assert!(portfolio.total_value().is_zero());
        assert_eq!(portfolio.total_value().currency(), "BRL");

        assert!(matches!(
            service
                .create_portfolio(investor.id(), "Outra", None)
                .await,
            Err(AppError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn create_portfolio_requires_investor() {
        let service = create_service(
            InMemoryPortfolioRepository::new(),
            InMemoryInvestorRepository::new(),
            InMemoryInvestmentRepository::new(),
        );
        assert!(matches!(
            service
                .create_portfolio(&UniqueEntityId::new(), "Carteira", None)
                .await,
            Err(AppError::ResourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn rename_is_owner_only() {
        let owner = UniqueEntityId::new();
        let portfolio = test_portfolio(&owner);
        let service = create_service(
            InMemoryPortfolioRepository::new().with_portfolio(portfolio.clone()),
            InMemoryInvestorRepository::new(),
            InMemoryInvestmentRepository::new(),
        );

        assert!(matches!(
            service
                .rename(&UniqueEntityId::new(), portfolio.id(), "Minha")
                .await,
            Err(AppError::NotAllowed(_))
        ));

        let renamed = service.rename(&owner, portfolio.id(), "Minha").await.unwrap();
        assert_eq!(renamed.name(), "Minha");
    }

    #[tokio::test]
    async fn allocations_cannot_exceed_full_portfolio() {
        let owner = UniqueEntityId::new();
        let portfolio = test_portfolio(&owner);
        let service = create_service(
            InMemoryPortfolioRepository::new().with_portfolio(portfolio.clone()),
            InMemoryInvestorRepository::new(),
            InMemoryInvestmentRepository::new(),
        );

        service
            .add_allocation(&owner, portfolio.id(), &"a".into(), 60.0)
            .await
            .unwrap();
        let err = service
            .add_allocation(&owner, portfolio.id(), &"b".into(), 45.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_invariant(),
            Some(InvariantViolation::AllocationExceeded(_))
        ));

        let updated = service
            .remove_allocation(&owner, portfolio.id(), &"a".into())
            .await
            .unwrap();
        assert!(updated.allocations().is_empty());
    }

    #[tokio::test]
    async fn refresh_total_value_sums_market_values() {
        let owner = UniqueEntityId::new();
        let portfolio = test_portfolio(&owner);

        let mut first = Investment::open(portfolio.id().clone(), "asset-1".into(), "BRL").unwrap();
        let mut tx_props = transaction_props(TransactionType::Buy, dec!(10), dec!(20));
        tx_props.portfolio_id = portfolio.id().clone();
        first
            .record(Transaction::create(tx_props, None).unwrap())
            .unwrap();

        let mut second = Investment::open(portfolio.id().clone(), "asset-2".into(), "BRL").unwrap();
        second.update_price(brl(dec!(5))).unwrap();

        let service = create_service(
            InMemoryPortfolioRepository::new().with_portfolio(portfolio.clone()),
            InMemoryInvestorRepository::new(),
            InMemoryInvestmentRepository::new()
                .with_investment(first)
                .with_investment(second),
        );

        let refreshed = service.refresh_total_value(portfolio.id()).await.unwrap();
        assert_eq!(refreshed.total_value(), &brl(dec!(200)));
    }

    #[tokio::test]
    async fn delete_removes_investments() {
        let owner = UniqueEntityId::new();
        let portfolio = test_portfolio(&owner);
        let investments = Arc::new(
            InMemoryInvestmentRepository::new().with_investment(
                Investment::open(portfolio.id().clone(), "asset-1".into(), "BRL").unwrap(),
            ),
        );
        let portfolios =
            Arc::new(InMemoryPortfolioRepository::new().with_portfolio(portfolio.clone()));
        let service = PortfolioService::new(
            portfolios.clone(),
            Arc::new(InMemoryInvestorRepository::new()),
            investments.clone(),
            "BRL".to_string(),
        );

        service.delete(&owner, portfolio.id()).await.unwrap();

        assert!(portfolios.find_by_id(portfolio.id()).await.unwrap().is_none());
        assert!(investments
            .find_many_by_portfolio(portfolio.id())
            .await
            .unwrap()
            .is_empty());
    }
}
