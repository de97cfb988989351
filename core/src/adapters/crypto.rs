//! Password hashing adapter
//!
//! Argon2id with a random salt per password, stored as a PHC string.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash,
        PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::domain::ports::PasswordHasher;
use crate::error::DomainError;

#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Internal(format!("Password hashing failed: {e}")))
    }

    /// Malformed stored hashes are an internal error, not a mismatch
    fn compare(&self, plain: &str, hashed: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hashed)
            .map_err(|e| DomainError::Internal(format!("Malformed password hash: {e}")))?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(DomainError::Internal(format!(
                "Password verification failed: {other}"
            ))),
        }
    }
}
