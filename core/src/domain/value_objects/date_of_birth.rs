use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Youngest age allowed to open an account
pub const MINIMUM_INVESTOR_AGE: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    pub fn create(date: NaiveDate) -> Result<Self, ValidationError> {
        Self::create_on(date, Utc::now().date_naive())
    }

    /// Validate against an explicit `today`
    pub fn create_on(date: NaiveDate, today: NaiveDate) -> Result<Self, ValidationError> {
        if date > today {
            return Err(ValidationError::InvalidDateOfBirth(format!(
                "{} is in the future",
                date
            )));
        }

        let age = age_on(date, today);
        if age < MINIMUM_INVESTOR_AGE {
            return Err(ValidationError::InvalidDateOfBirth(format!(
                "investor must be at least {} years old, got {}",
                MINIMUM_INVESTOR_AGE, age
            )));
        }

        Ok(Self(date))
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }

    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.0, today)
    }
}

impl std::fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole years elapsed, one less if this year's birthday has not come yet
fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
