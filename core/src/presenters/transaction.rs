use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::MoneyView;
use crate::domain::entities::{Entity, Transaction, TransactionType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: String,
    pub portfolio_id: String,
    pub asset_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub quantity: Decimal,
    pub price: MoneyView,
    pub fees: MoneyView,
    pub income: MoneyView,
    pub total_amount: MoneyView,
    pub date_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub fn present(transaction: &Transaction) -> TransactionView {
    TransactionView {
        id: transaction.id().to_string(),
        portfolio_id: transaction.portfolio_id().to_string(),
        asset_id: transaction.asset_id().to_string(),
        kind: transaction.kind(),
        quantity: transaction.quantity().value(),
        price: transaction.price().into(),
        fees: transaction.fees().into(),
        income: transaction.income().into(),
        total_amount: transaction.total_amount().into(),
        date_at: transaction.date_at(),
        created_at: transaction.created_at(),
    }
}

pub fn present_many(transactions: &[Transaction]) -> Vec<TransactionView> {
    transactions.iter().map(present).collect()
}
