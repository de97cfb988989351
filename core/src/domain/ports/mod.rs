//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod cryptography;
pub mod repositories;

pub use cryptography::PasswordHasher;
pub use repositories::{
    AlertRepository, AssetRepository, GoalRepository, InvestmentRepository,
    InvestorRepository, NotificationRepository, PaginationParams, PortfolioRepository,
    TransactionRepository,
};
