use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MIN_NAME_LENGTH: usize = 2;

/// Latin letters, accented Latin letters (excluding × and ÷) and spaces
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ ]+$").expect("name pattern is a valid regex")
    })
}

/// A person's name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
    pub fn create(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::InvalidName("name cannot be empty".to_string()));
        }

        if trimmed.chars().count() < MIN_NAME_LENGTH {
            return Err(ValidationError::InvalidName(format!(
                "name must have at least {} characters",
                MIN_NAME_LENGTH
            )));
        }

        if !name_pattern().is_match(trimmed) {
            return Err(ValidationError::InvalidName(format!(
                "name may only contain letters and spaces: '{}'",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
