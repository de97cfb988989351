//! Domain entities
//!
//! Aggregates of the investment domain. Each holds a `UniqueEntityId` and a
//! props struct, exposes getters, and mutates only through explicit methods
//! that keep its invariants.

pub mod alert;
pub mod asset;
pub mod entity;
pub mod goal;
pub mod investment;
pub mod investor;
pub mod notification;
pub mod portfolio;
pub mod transaction;

pub use alert::{Alert, AlertProps, AlertType};
pub use asset::{Asset, AssetProps, AssetType};
pub use entity::{Entity, UniqueEntityId};
pub use goal::{Goal, GoalPriority, GoalProps, GoalStatus};
pub use investment::{Investment, InvestmentProps};
pub use investor::{Investor, InvestorProps, RiskProfile};
pub use notification::{Notification, NotificationProps, NotificationType};
pub use portfolio::{Allocation, Portfolio, PortfolioProps};
pub use transaction::{Transaction, TransactionProps, TransactionType};
