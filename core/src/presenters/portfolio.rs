use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::MoneyView;
use crate::domain::entities::{Entity, Investment, Portfolio};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationView {
    pub asset_id: String,
    pub target_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub id: String,
    pub investor_id: String,
    pub name: String,
    pub total_value: MoneyView,
    pub allocations: Vec<AllocationView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentView {
    pub id: String,
    pub portfolio_id: String,
    pub asset_id: String,
    pub quantity: Decimal,
    pub current_price: MoneyView,
    /// Absent when price times quantity does not fit a decimal
    pub market_value: Option<MoneyView>,
    pub transaction_count: usize,
}

pub fn present(portfolio: &Portfolio) -> PortfolioView {
    PortfolioView {
        id: portfolio.id().to_string(),
        investor_id: portfolio.investor_id().to_string(),
        name: portfolio.name().to_string(),
        total_value: portfolio.total_value().into(),
        allocations: portfolio
            .allocations()
            .iter()
            .map(|a| AllocationView {
                asset_id: a.asset_id.to_string(),
                target_percentage: a.target.value(),
            })
            .collect(),
        created_at: portfolio.created_at(),
        updated_at: portfolio.updated_at(),
    }
}

pub fn present_investment(investment: &Investment) -> InvestmentView {
    InvestmentView {
        id: investment.id().to_string(),
        portfolio_id: investment.portfolio_id().to_string(),
        asset_id: investment.asset_id().to_string(),
        quantity: investment.quantity().value(),
        current_price: investment.current_price().into(),
        market_value: investment.market_value().ok().as_ref().map(MoneyView::from),
        transaction_count: investment.transactions().len(),
    }
}
