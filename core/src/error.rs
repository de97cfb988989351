//! Unified error types for the Carteira core
//!
//! This module defines error types for each layer:
//! - `ValidationError`: malformed value-object or aggregate input
//! - `InvariantViolation`: an operation that would break an aggregate or value invariant
//! - `DomainError`: everything a domain operation or repository port can fail with
//! - `AppError`: the closed set of outcomes a service hands back to its caller

use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input rejected at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid CPF: {0}")]
    InvalidCpf(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid date of birth: {0}")]
    InvalidDateOfBirth(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid money: {0}")]
    InvalidMoney(String),

    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Invalid alert: {0}")]
    InvalidAlert(String),

    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    #[error("Invalid portfolio: {0}")]
    InvalidPortfolio(String),

    #[error("Invalid notification: {0}")]
    InvalidNotification(String),
}

/// Business rule broken by an operation on otherwise valid values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("Insufficient quantity: available {available}, requested {requested}")]
    InsufficientQuantity {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Operation would leave a negative balance: {amount} {currency}")]
    NegativeBalance { amount: Decimal, currency: String },

    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Goal {0} is not active")]
    GoalNotActive(String),

    #[error("Alert {0} is inactive")]
    AlertInactive(String),

    #[error("Allocations would exceed 100% (total {0}%)")]
    AllocationExceeded(f64),

    #[error("Transaction does not belong to this investment: {0}")]
    ForeignTransaction(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

/// Domain layer errors - validation, invariants and persistence failures
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Service layer errors - what every use case returns on failure
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Not allowed: {0}")]
    NotAllowed(String),

    #[error("Wrong credentials")]
    WrongCredentials,

    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Domain(DomainError::Validation(e))
    }
}

impl From<InvariantViolation> for AppError {
    fn from(e: InvariantViolation) -> Self {
        AppError::Domain(DomainError::Invariant(e))
    }
}

impl AppError {
    /// The validation failure carried by this error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Domain(DomainError::Validation(e)) => Some(e),
            _ => None,
        }
    }

    /// The invariant violation carried by this error, if any
    pub fn as_invariant(&self) -> Option<&InvariantViolation> {
        match self {
            AppError::Domain(DomainError::Invariant(e)) => Some(e),
            _ => None,
        }
    }
}
