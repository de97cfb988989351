//! Value objects
//!
//! Immutable, identity-less values validated at construction. Every
//! "change" produces a new instance.

pub mod cpf;
pub mod date_of_birth;
pub mod email;
pub mod money;
pub mod name;
pub mod password;
pub mod percentage;
pub mod period;
pub mod quantity;

pub use cpf::Cpf;
pub use date_of_birth::{DateOfBirth, MINIMUM_INVESTOR_AGE};
pub use email::Email;
pub use money::{Money, NegativeBalancePolicy, DEFAULT_CURRENCY};
pub use name::Name;
pub use password::Password;
pub use percentage::Percentage;
pub use period::Period;
pub use quantity::Quantity;
