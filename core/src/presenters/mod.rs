//! Presenters
//!
//! One-way projections of aggregates into plain serializable views for
//! transport. Ids are strings, decimals serialize as strings, and keys are
//! camelCase.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_objects::Money;

pub mod alert;
pub mod goal;
pub mod investor;
pub mod notification;
pub mod portfolio;
pub mod transaction;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyView {
    pub amount: Decimal,
    pub currency: String,
}

impl From<&Money> for MoneyView {
    fn from(money: &Money) -> Self {
        Self {
            amount: money.amount(),
            currency: money.currency().to_string(),
        }
    }
}
