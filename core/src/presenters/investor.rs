use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::entities::{Entity, Investor, RiskProfile};

/// Public investor profile; the password hash is never exposed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorView {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Masked as `XXX.XXX.XXX-XX`
    pub cpf: String,
    pub date_of_birth: NaiveDate,
    pub risk_profile: RiskProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn present(investor: &Investor) -> InvestorView {
    InvestorView {
        id: investor.id().to_string(),
        name: investor.name().value().to_string(),
        email: investor.email().value().to_string(),
        cpf: investor.cpf().formatted(),
        date_of_birth: investor.date_of_birth().value(),
        risk_profile: investor.risk_profile(),
        created_at: investor.created_at(),
        updated_at: investor.updated_at(),
    }
}
