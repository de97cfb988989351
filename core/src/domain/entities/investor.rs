//! Investor domain entity
//!
//! A registered person who owns a portfolio and goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::domain::value_objects::{Cpf, DateOfBirth, Email, Name};

/// Investor risk appetite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskProfile::Conservative => write!(f, "conservative"),
            RiskProfile::Moderate => write!(f, "moderate"),
            RiskProfile::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl std::str::FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "aggressive" => Ok(RiskProfile::Aggressive),
            _ => Err(format!("Unknown risk profile: {}", s)),
        }
    }
}

/// Everything needed to build or restore an investor
#[derive(Debug, Clone)]
pub struct InvestorProps {
    pub name: Name,
    pub email: Email,
    pub cpf: Cpf,
    pub date_of_birth: DateOfBirth,
    /// Output of the `PasswordHasher` port, never the raw password
    pub password_hash: String,
    pub risk_profile: RiskProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Investor {
    id: UniqueEntityId,
    props: InvestorProps,
}

impl Investor {
    pub fn create(props: InvestorProps, id: Option<UniqueEntityId>) -> Self {
        Self {
            id: UniqueEntityId::or_new(id),
            props,
        }
    }

    pub fn name(&self) -> &Name {
        &self.props.name
    }

    pub fn email(&self) -> &Email {
        &self.props.email
    }

    pub fn cpf(&self) -> &Cpf {
        &self.props.cpf
    }

    pub fn date_of_birth(&self) -> &DateOfBirth {
        &self.props.date_of_birth
    }

    pub fn password_hash(&self) -> &str {
        &self.props.password_hash
    }

    pub fn risk_profile(&self) -> RiskProfile {
        self.props.risk_profile
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.props.updated_at
    }

    pub fn change_name(&mut self, name: Name) {
        self.props.name = name;
        self.touch();
    }

    pub fn change_email(&mut self, email: Email) {
        self.props.email = email;
        self.touch();
    }

    pub fn change_risk_profile(&mut self, risk_profile: RiskProfile) {
        self.props.risk_profile = risk_profile;
        self.touch();
    }

    pub fn change_password_hash(&mut self, password_hash: String) {
        self.props.password_hash = password_hash;
        self.touch();
    }

    fn touch(&mut self) {
        self.props.updated_at = Some(Utc::now());
    }
}

impl Entity for Investor {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}
