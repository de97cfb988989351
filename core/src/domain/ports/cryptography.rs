//! Cryptography port traits

use crate::error::DomainError;

/// Hashes and verifies investor passwords
///
/// Implementations must never return the plain password from `hash`.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    fn compare(&self, plain: &str, hashed: &str) -> Result<bool, DomainError>;
}
