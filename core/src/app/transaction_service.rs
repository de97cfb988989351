//! Transaction service
//!
//! Records buys, sells and dividends against a portfolio and keeps the
//! matching investment and the portfolio's total value in step.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::portfolio_service::sum_market_values;
use crate::config::MAX_PAGE_SIZE;
use crate::domain::entities::{
    Entity, Investment, Portfolio, Transaction, TransactionProps, TransactionType, UniqueEntityId,
};
use crate::domain::ports::{
    AssetRepository, InvestmentRepository, PaginationParams, PortfolioRepository,
    TransactionRepository,
};
use crate::domain::value_objects::{Money, Quantity};
use crate::error::{AppError, InvariantViolation};

/// Raw transaction input; amounts are in the asset's currency
#[derive(Debug, Clone)]
pub struct RecordTransaction {
    pub portfolio_id: UniqueEntityId,
    pub asset_id: UniqueEntityId,
    pub kind: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
    pub income: Decimal,
    pub date_at: DateTime<Utc>,
}

/// Service for recording and listing transactions
pub struct TransactionService<PR, AR, INV, TR>
where
    PR: PortfolioRepository,
    AR: AssetRepository,
    INV: InvestmentRepository,
    TR: TransactionRepository,
{
    portfolios: Arc<PR>,
    assets: Arc<AR>,
    investments: Arc<INV>,
    transactions: Arc<TR>,
    default_page_size: u32,
}

impl<PR, AR, INV, TR> TransactionService<PR, AR, INV, TR>
where
    PR: PortfolioRepository,
    AR: AssetRepository,
    INV: InvestmentRepository,
    TR: TransactionRepository,
{
    pub fn new(
        portfolios: Arc<PR>,
        assets: Arc<AR>,
        investments: Arc<INV>,
        transactions: Arc<TR>,
        default_page_size: u32,
    ) -> Self {
        Self {
            portfolios,
            assets,
            investments,
            transactions,
            default_page_size,
        }
    }

    /// Record a transaction for one of the investor's portfolios
    ///
    /// The investment for (portfolio, asset) is opened on the first buy. A
    /// sell or dividend without a position is rejected. On success the
    /// transaction, the investment and the portfolio's total value are saved.
    pub async fn record_transaction(
        &self,
        investor_id: &UniqueEntityId,
        input: RecordTransaction,
    ) -> Result<Transaction, AppError> {
        let mut portfolio = self.owned_portfolio(investor_id, &input.portfolio_id).await?;

        let asset = self
            .assets
            .find_by_id(&input.asset_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Asset {}", input.asset_id)))?;

        if asset.currency() != portfolio.total_value().currency() {
            return Err(InvariantViolation::CurrencyMismatch {
                expected: portfolio.total_value().currency().to_string(),
                found: asset.currency().to_string(),
            }
            .into());
        }

        let currency = Some(asset.currency());
        let transaction = Transaction::create(
            TransactionProps {
                portfolio_id: input.portfolio_id.clone(),
                asset_id: input.asset_id.clone(),
                kind: input.kind,
                quantity: Quantity::create(input.quantity)?,
                price: Money::create(input.price, currency)?,
                fees: Money::create(input.fees, currency)?,
                income: Money::create(input.income, currency)?,
                date_at: input.date_at,
                created_at: Utc::now(),
            },
            None,
        )?;

        let existing = self
            .investments
            .find_by_portfolio_and_asset(&input.portfolio_id, &input.asset_id)
            .await?;
        let is_new = existing.is_none();

        let mut investment = match existing {
            Some(investment) => investment,
            None if input.kind == TransactionType::Dividend => {
                return Err(AppError::NotAllowed(format!(
                    "No position in {} to receive dividends",
                    asset.symbol()
                )));
            }
            None => Investment::open(
                input.portfolio_id.clone(),
                input.asset_id.clone(),
                asset.currency(),
            )?,
        };

        if let Err(e) = investment.record(transaction.clone()) {
            tracing::warn!(
                portfolio_id = %input.portfolio_id,
                asset = %asset.symbol(),
                kind = %input.kind,
                error = %e,
                "Transaction rejected"
            );
            return Err(e.into());
        }

        // Value the portfolio with the updated position before anything is saved
        let mut holdings: Vec<Investment> = self
            .investments
            .find_many_by_portfolio(&input.portfolio_id)
            .await?
            .into_iter()
            .filter(|held| !held.same_identity_as(&investment))
            .collect();
        holdings.push(investment.clone());
        let total = sum_market_values(&holdings, portfolio.total_value().currency())?;

        self.transactions.create(&transaction).await?;
        if is_new {
            self.investments.create(&investment).await?;
        } else {
            self.investments.update(&investment).await?;
        }
        portfolio.set_total_value(total);
        self.portfolios.update(&portfolio).await?;

        tracing::info!(
            transaction_id = %transaction.id(),
            portfolio_id = %input.portfolio_id,
            asset = %asset.symbol(),
            kind = %transaction.kind(),
            total = %transaction.total_amount(),
            "Transaction recorded"
        );

        Ok(transaction)
    }

    /// Page through one asset's transactions, newest first
    ///
    /// `per_page` defaults to the configured page size and is capped at
    /// [`MAX_PAGE_SIZE`].
    pub async fn list_transactions(
        &self,
        investor_id: &UniqueEntityId,
        portfolio_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<Transaction>, AppError> {
        self.owned_portfolio(investor_id, portfolio_id).await?;

        let params = PaginationParams::new(
            page.unwrap_or(1),
            per_page.unwrap_or(self.default_page_size),
            MAX_PAGE_SIZE,
        );

        Ok(self
            .transactions
            .find_many_by_portfolio_and_asset(portfolio_id, asset_id, &params)
            .await?)
    }

    pub async fn get_transaction(
        &self,
        investor_id: &UniqueEntityId,
        transaction_id: &UniqueEntityId,
    ) -> Result<Transaction, AppError> {
        let transaction = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Transaction {}", transaction_id)))?;

        self.owned_portfolio(investor_id, transaction.portfolio_id())
            .await?;

        Ok(transaction)
    }

    async fn owned_portfolio(
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
            return Err(AppError::NotAllowed(
                "Portfolio belongs to another investor".to_string(),
            ));
        }

        Ok(portfolio)
    }
}
