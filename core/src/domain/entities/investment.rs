//! Investment domain entity
//!
//! Position in one asset of one portfolio, derived from its transactions.

use chrono::{DateTime, Utc};

use super::entity::{Entity, UniqueEntityId};
use super::transaction::{Transaction, TransactionType};
use crate::domain::value_objects::{Money, Quantity};
use crate::error::{DomainError, InvariantViolation};

#[derive(Debug, Clone)]
pub struct InvestmentProps {
    pub portfolio_id: UniqueEntityId,
    pub asset_id: UniqueEntityId,
    pub quantity: Quantity,
    pub current_price: Money,
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Investment {
    id: UniqueEntityId,
    props: InvestmentProps,
}

impl Investment {
    pub fn create(props: InvestmentProps, id: Option<UniqueEntityId>) -> Self {
        Self {
            id: UniqueEntityId::or_new(id),
            props,
        }
    }

    /// An empty position priced at zero in `currency`
    pub fn open(
        portfolio_id: UniqueEntityId,
        asset_id: UniqueEntityId,
        currency: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self::create(
            InvestmentProps {
                portfolio_id,
                asset_id,
                quantity: Quantity::zero(),
                current_price: Money::zero_in(currency)?,
                transactions: Vec::new(),
                created_at: Utc::now(),
                updated_at: None,
            },
            None,
        ))
    }

    /// Replay a transaction history in date order
    pub fn from_history(
        portfolio_id: UniqueEntityId,
        asset_id: UniqueEntityId,
        currency: &str,
        mut transactions: Vec<Transaction>,
    ) -> Result<Self, DomainError> {
        transactions.sort_by_key(|t| t.date_at());
        let mut investment = Self::open(portfolio_id, asset_id, currency)?;
        for transaction in transactions {
            investment.record(transaction)?;
        }
        Ok(investment)
    }

    pub fn portfolio_id(&self) -> &UniqueEntityId {
        &self.props.portfolio_id
    }

    pub fn asset_id(&self) -> &UniqueEntityId {
        &self.props.asset_id
    }

    pub fn quantity(&self) -> &Quantity {
        &self.props.quantity
    }

    pub fn current_price(&self) -> &Money {
        &self.props.current_price
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.props.transactions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    /// Apply a transaction to the position
    ///
    /// Buys add units and sells remove them, both moving `current_price` to the
    /// traded price. Dividends leave the position unchanged. Nothing is
    /// modified when the transaction is rejected.
    pub fn record(&mut self, transaction: Transaction) -> Result<(), DomainError> {
        if transaction.portfolio_id() != &self.props.portfolio_id
            || transaction.asset_id() != &self.props.asset_id
        {
            return Err(InvariantViolation::ForeignTransaction(transaction.id().to_string()).into());
        }

        if transaction.currency() != self.props.current_price.currency() {
            return Err(InvariantViolation::CurrencyMismatch {
                expected: self.props.current_price.currency().to_string(),
                found: transaction.currency().to_string(),
            }
            .into());
        }

        let quantity = match transaction.kind() {
            TransactionType::Buy => self.props.quantity.add(transaction.quantity())?,
            TransactionType::Sell => self.props.quantity.subtract(transaction.quantity())?,
            TransactionType::Dividend => self.props.quantity,
        };

        if transaction.kind().moves_quantity() {
            self.props.current_price = transaction.price().clone();
        }
        self.props.quantity = quantity;
        self.props.transactions.push(transaction);
        self.props.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Reprice the position from a market quote
    pub fn update_price(&mut self, price: Money) -> Result<(), InvariantViolation> {
        if price.currency() != self.props.current_price.currency() {
            return Err(InvariantViolation::CurrencyMismatch {
                expected: self.props.current_price.currency().to_string(),
                found: price.currency().to_string(),
            });
        }
        self.props.current_price = price;
        self.props.updated_at = Some(Utc::now());
        Ok(())
    }

    pub fn market_value(&self) -> Result<Money, InvariantViolation> {
        self.props.current_price.times(&self.props.quantity)
    }

    pub fn total_dividends(&self) -> Result<Money, InvariantViolation> {
        let zero = Money::zero_in(self.props.current_price.currency()).unwrap_or_else(|_| Money::zero());
        self.props
            .transactions
            .iter()
            .filter(|t| t.kind() == TransactionType::Dividend)
            .try_fold(zero, |acc, t| acc.add(t.income()))
    }
}

impl Entity for Investment {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}
