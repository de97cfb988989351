//! CPF value object
//!
//! Brazilian individual taxpayer number. Eleven digits, the last two being
//! mod-11 verifier digits over the preceding ones.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const CPF_LENGTH: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    /// Parse a CPF, ignoring punctuation such as `529.982.247-25`
    pub fn create(raw: &str) -> Result<Self, ValidationError> {
        let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != CPF_LENGTH {
            return Err(ValidationError::InvalidCpf(format!(
                "expected {} digits, got {}",
                CPF_LENGTH,
                digits.len()
            )));
        }

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(ValidationError::InvalidCpf(
                "repeated digit sequences are not valid".to_string(),
            ));
        }

        if verifier_digit(&digits[..9]) != digits[9] || verifier_digit(&digits[..10]) != digits[10]
        {
            return Err(ValidationError::InvalidCpf(
                "verifier digits do not match".to_string(),
            ));
        }

        Ok(Self(
            digits
                .iter()
                .filter_map(|d| char::from_digit(*d, 10))
                .collect(),
        ))
    }

    /// The bare eleven digits
    pub fn value(&self) -> &str {
        &self.0
    }

    /// `XXX.XXX.XXX-XX`
    pub fn formatted(&self) -> String {
        format!(
            "{}.{}.{}-{}",
            &self.0[0..3],
            &self.0[3..6],
            &self.0[6..9],
            &self.0[9..11]
        )
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Weights run from `len + 1` down to 2; a remainder of 10 maps to 0
fn verifier_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder == 10 {
        0
    } else {
        remainder
    }
}
