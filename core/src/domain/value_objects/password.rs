use crate::error::ValidationError;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Symbols that satisfy the "at least one special character" rule
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A plain-text password that passed the strength rules
///
/// Never serialized and never printed by `Debug`; hashing happens through the
/// `PasswordHasher` port.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn create(raw: &str) -> Result<Self, ValidationError> {
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::InvalidPassword(format!(
                "password must have at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if !raw.chars().any(|c| c.is_uppercase()) {
            return Err(ValidationError::InvalidPassword(
                "password must contain an uppercase letter".to_string(),
            ));
        }

        if !raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
            return Err(ValidationError::InvalidPassword(format!(
                "password must contain one of {}",
                PASSWORD_SYMBOLS
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}
