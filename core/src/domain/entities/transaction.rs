//! Transaction domain entity
//!
//! An immutable record of a buy, sell or dividend against one asset of a
//! portfolio. Corrections are new transactions, never edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::domain::value_objects::{Money, NegativeBalancePolicy, Quantity};
use crate::error::{DomainError, InvariantViolation, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
}

impl TransactionType {
    /// Buys and sells move units; dividends do not
    pub fn moves_quantity(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Sell)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "buy"),
            TransactionType::Sell => write!(f, "sell"),
            TransactionType::Dividend => write!(f, "dividend"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(TransactionType::Buy),
            "sell" => Ok(TransactionType::Sell),
            "dividend" => Ok(TransactionType::Dividend),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// Input for a transaction; `total_amount` is always derived
#[derive(Debug, Clone)]
pub struct TransactionProps {
    pub portfolio_id: UniqueEntityId,
    pub asset_id: UniqueEntityId,
    pub kind: TransactionType,
    pub quantity: Quantity,
    /// Unit price; its currency is the transaction's currency
    pub price: Money,
    pub fees: Money,
    pub income: Money,
    pub date_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Transaction {
    id: UniqueEntityId,
    props: TransactionProps,
    total_amount: Money,
}

impl Transaction {
    pub fn create(props: TransactionProps, id: Option<UniqueEntityId>) -> Result<Self, DomainError> {
        Self::create_at(props, id, Utc::now())
    }

    /// Build against an explicit `now`, which bounds `date_at`
    ///
    /// Buy/Sell need a positive quantity and get `price × quantity` as total
    /// with zero income. Dividends get zero quantity, zero fees and zero total,
    /// and need a positive income.
    pub fn create_at(
        mut props: TransactionProps,
        id: Option<UniqueEntityId>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if props.date_at > now {
            return Err(ValidationError::InvalidTransaction(format!(
                "transaction date {} is in the future",
                props.date_at
            ))
            .into());
        }

        let currency = props.price.currency().to_string();
        for other in [&props.fees, &props.income] {
            if other.currency() != currency {
                return Err(InvariantViolation::CurrencyMismatch {
                    expected: currency,
                    found: other.currency().to_string(),
                }
                .into());
            }
        }

        let zero = Money::zero_in(&currency)?;
        let total_amount = match props.kind {
            TransactionType::Buy | TransactionType::Sell => {
                if props.quantity.is_zero() {
                    return Err(ValidationError::InvalidQuantity(format!(
                        "{} quantity must be greater than zero",
                        props.kind
                    ))
                    .into());
                }
                props.income = zero;
                props.price.times(&props.quantity)?
            }
            TransactionType::Dividend => {
                if props.income.is_zero() {
                    return Err(ValidationError::InvalidTransaction(
                        "dividend income must be greater than zero".to_string(),
                    )
                    .into());
                }
                props.quantity = Quantity::zero();
                props.fees = zero.clone();
                zero
            }
        };

        Ok(Self {
            id: UniqueEntityId::or_new(id),
            props,
            total_amount,
        })
    }

    pub fn portfolio_id(&self) -> &UniqueEntityId {
        &self.props.portfolio_id
    }

    pub fn asset_id(&self) -> &UniqueEntityId {
        &self.props.asset_id
    }

    pub fn kind(&self) -> TransactionType {
        self.props.kind
    }

    pub fn quantity(&self) -> &Quantity {
        &self.props.quantity
    }

    pub fn price(&self) -> &Money {
        &self.props.price
    }

    pub fn fees(&self) -> &Money {
        &self.props.fees
    }

    pub fn income(&self) -> &Money {
        &self.props.income
    }

    pub fn total_amount(&self) -> &Money {
        &self.total_amount
    }

    pub fn currency(&self) -> &str {
        self.props.price.currency()
    }

    pub fn date_at(&self) -> DateTime<Utc> {
        self.props.date_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    /// Cash effect: buys cost total plus fees, sells yield total minus fees,
    /// dividends yield their income. A sell whose fees exceed its total is negative.
    pub fn net_amount(&self) -> Result<Money, InvariantViolation> {
        match self.props.kind {
            TransactionType::Buy => self.total_amount.add(&self.props.fees),
            TransactionType::Sell => self
                .total_amount
                .subtract_with(&self.props.fees, NegativeBalancePolicy::Allow),
            TransactionType::Dividend => Ok(self.props.income.clone()),
        }
    }
}

impl Entity for Transaction {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}
