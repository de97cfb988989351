//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::entities::{
    Alert, AlertProps, AlertType, Asset, AssetProps, AssetType, Goal, GoalPriority, GoalProps,
    GoalStatus, Investor, InvestorProps, Notification, NotificationProps, NotificationType,
    Portfolio, PortfolioProps, RiskProfile, Transaction, TransactionProps, TransactionType,
    UniqueEntityId,
};
use crate::domain::value_objects::{Cpf, DateOfBirth, Email, Money, Name, Quantity};

/// A valid CPF used by most fixtures
pub const TEST_CPF: &str = "529.982.247-25";
/// Another valid CPF, for a second investor
pub const OTHER_TEST_CPF: &str = "111.444.777-35";
pub const TEST_EMAIL: &str = "ana@carteira.dev";
pub const TEST_PASSWORD: &str = "Segredo#1";

pub fn brl(amount: Decimal) -> Money {
    Money::create(amount, None).unwrap()
}

/// Create a test investor with default values
pub fn test_investor() -> Investor {
    test_investor_with("Ana Lima", TEST_EMAIL, TEST_CPF)
}

pub fn test_investor_with(name: &str, email: &str, cpf: &str) -> Investor {
    Investor::create(
        InvestorProps {
            name: Name::create(name).unwrap(),
            email: Email::create(email).unwrap(),
            cpf: Cpf::create(cpf).unwrap(),
            date_of_birth: DateOfBirth::create(NaiveDate::from_ymd_opt(1990, 5, 10).unwrap())
                .unwrap(),
            password_hash: format!("hashed:{}", TEST_PASSWORD),
            risk_profile: RiskProfile::Moderate,
            created_at: Utc::now(),
            updated_at: None,
        },
        None,
    )
}

/// Create an empty BRL portfolio owned by `investor_id`
pub fn test_portfolio(investor_id: &UniqueEntityId) -> Portfolio {
    Portfolio::create(
        PortfolioProps {
            investor_id: investor_id.clone(),
            name: "Carteira principal".to_string(),
            total_value: Money::zero(),
            allocations: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        },
        None,
    )
    .unwrap()
}

pub fn test_asset(symbol: &str) -> Asset {
    test_asset_in(symbol, "BRL")
}

pub fn test_asset_in(symbol: &str, currency: &str) -> Asset {
    Asset::create(
        AssetProps {
            symbol: symbol.to_string(),
            name: format!("{} test asset", symbol),
            asset_type: AssetType::Stock,
            currency: currency.to_string(),
            sector: None,
            created_at: Utc::now(),
        },
        None,
    )
    .unwrap()
}

/// Props for a BRL transaction on `portfolio-1`/`asset-1`, dated yesterday
///
/// Dividends get an income of 12.34 so they are valid as-is.
pub fn transaction_props(
    kind: TransactionType,
    quantity: Decimal,
    price: Decimal,
) -> TransactionProps {
    let income = match kind {
        TransactionType::Dividend => dec!(12.34),
        _ => Decimal::ZERO,
    };
    TransactionProps {
        portfolio_id: "portfolio-1".into(),
        asset_id: "asset-1".into(),
        kind,
        quantity: Quantity::create(quantity).unwrap(),
        price: brl(price),
        fees: brl(Decimal::ZERO),
        income: brl(income),
        date_at: Utc::now() - Duration::days(1),
        created_at: Utc::now(),
    }
}

pub fn test_transaction(kind: TransactionType, quantity: Decimal, price: Decimal) -> Transaction {
    Transaction::create(transaction_props(kind, quantity, price), None).unwrap()
}

/// An active 10,000 BRL goal due in a year, nothing saved yet
pub fn test_goal(investor_id: &UniqueEntityId) -> Goal {
    Goal::create(
        GoalProps {
            investor_id: investor_id.clone(),
            name: "Reserva de emergência".to_string(),
            description: None,
            target_amount: brl(dec!(10000)),
            current_amount: brl(Decimal::ZERO),
            target_date: Utc::now().date_naive() + Duration::days(365),
            priority: GoalPriority::Medium,
            status: GoalStatus::Active,
            created_at: Utc::now(),
            updated_at: None,
        },
        None,
    )
    .unwrap()
}

pub fn test_alert(
    user_id: &UniqueEntityId,
    asset_id: &UniqueEntityId,
    alert_type: AlertType,
    threshold: Decimal,
) -> Alert {
    Alert::create(
        AlertProps {
            user_id: user_id.clone(),
            asset_id: asset_id.clone(),
            alert_type,
            threshold,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
        None,
    )
    .unwrap()
}

pub fn test_notification(user_id: &UniqueEntityId) -> Notification {
    Notification::create(
        NotificationProps {
            user_id: user_id.clone(),
            kind: NotificationType::System,
            title: "Bem-vindo".to_string(),
            message: "Sua carteira foi criada".to_string(),
            is_read: false,
            created_at: Utc::now(),
            read_at: None,
        },
        None,
    )
    .unwrap()
}
