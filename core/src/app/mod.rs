//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports, and translate
//! domain failures into [`AppError`](crate::error::AppError).

pub mod alert_service;
pub mod asset_service;
pub mod goal_projection;
pub mod goal_service;
pub mod investor_service;
pub mod notification_service;
pub mod portfolio_service;
pub mod transaction_service;

pub use alert_service::{AlertService, UpdateAlert};
pub use asset_service::{AssetService, RegisterAsset};
pub use goal_projection::{ContributionScenario, GoalProjection, ScenarioKind};
pub use goal_service::{CreateGoal, EditGoal, GoalService};
pub use investor_service::{InvestorService, RegisterInvestor, UpdateProfile};
pub use notification_service::NotificationService;
pub use portfolio_service::PortfolioService;
pub use transaction_service::{RecordTransaction, TransactionService};
