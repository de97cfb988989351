//! Adapters
//!
//! Concrete implementations of the domain ports that need no external
//! service. Persistence adapters live with the host application.

pub mod crypto;

pub use crypto::Argon2PasswordHasher;
