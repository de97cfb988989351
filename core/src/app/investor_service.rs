//! Investor service
//!
//! Handles investor registration, authentication, and profile management.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::entities::{Entity, Investor, InvestorProps, RiskProfile, UniqueEntityId};
use crate::domain::ports::{InvestorRepository, PasswordHasher};
use crate::domain::value_objects::{Cpf, DateOfBirth, Email, Name, Password};
use crate::error::AppError;

/// Raw registration input, validated by [`InvestorService::register`]
#[derive(Debug, Clone)]
pub struct RegisterInvestor {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub risk_profile: Option<RiskProfile>,
}

/// Profile fields to change; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub risk_profile: Option<RiskProfile>,
}

/// Service for managing investors
pub struct InvestorService<IR, PH>
where
    IR: InvestorRepository,
    PH: PasswordHasher,
{
    investors: Arc<IR>,
    hasher: Arc<PH>,
}

impl<IR, PH> InvestorService<IR, PH>
where
    IR: InvestorRepository,
    PH: PasswordHasher,
{
    pub fn new(investors: Arc<IR>, hasher: Arc<PH>) -> Self {
        Self { investors, hasher }
    }

    /// Register a new investor
    ///
    /// Every value object is validated before any lookup. Email and CPF must
    /// both be unused. The password is stored only as the hasher's output.
    pub async fn register(&self, input: RegisterInvestor) -> Result<Investor, AppError> {
        let name = Name::create(&input.name)?;
        let email = Email::create(&input.email)?;
        let cpf = Cpf::create(&input.cpf)?;
        let password = Password::create(&input.password)?;
        let date_of_birth = DateOfBirth::create(input.date_of_birth)?;

        if self.investors.find_by_email(email.value()).await?.is_some() {
            tracing::warn!(email = %email, "Registration rejected: email already in use");
            return Err(AppError::AlreadyExists(format!(
                "An investor with email '{}' already exists",
                email
            )));
        }

        if self.investors.find_by_cpf(cpf.value()).await?.is_some() {
            tracing::warn!("Registration rejected: CPF already in use");
            return Err(AppError::AlreadyExists(
                "An investor with this CPF already exists".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(password.value())?;

        let investor = Investor::create(
            InvestorProps {
                name,
                email,
                cpf,
                date_of_birth,
                password_hash,
                risk_profile: input.risk_profile.unwrap_or_default(),
                created_at: Utc::now(),
                updated_at: None,
            },
            None,
        );

        self.investors.create(&investor).await?;

        tracing::info!(investor_id = %investor.id(), "Investor registered");

        Ok(investor)
    }

    /// Check an email/password pair
    ///
    /// Unknown emails, malformed emails and wrong passwords all fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Investor, AppError> {
        let email = Email::create(email).map_err(|_| AppError::WrongCredentials)?;

        let investor = match self.investors.find_by_email(email.value()).await? {
            Some(investor) => investor,
            None => {
                tracing::debug!("Authentication failed: unknown email");
                return Err(AppError::WrongCredentials);
            }
        };

        if !self.hasher.compare(password, investor.password_hash())? {
            tracing::debug!(investor_id = %investor.id(), "Authentication failed: wrong password");
            return Err(AppError::WrongCredentials);
        }

        Ok(investor)
    }

    pub async fn get_profile(&self, investor_id: &UniqueEntityId) -> Result<Investor, AppError> {
        self.investors
            .find_by_id(investor_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Investor {}", investor_id)))
    }

    /// Update name, email and/or risk profile
    ///
    /// A new email must not belong to another investor.
    pub async fn update_profile(
        &self,
        investor_id: &UniqueEntityId,
        update: UpdateProfile,
    ) -> Result<Investor, AppError> {
        let mut investor = self.get_profile(investor_id).await?;

        if let Some(name) = update.name {
            investor.change_name(Name::create(&name)?);
        }

        if let Some(email) = update.email {
            let email = Email::create(&email)?;
            if email != *investor.email() {
                if let Some(other) = self.investors.find_by_email(email.value()).await? {
                    if !other.same_identity_as(&investor) {
                        return Err(AppError::AlreadyExists(format!(
                            "An investor with email '{}' already exists",
                            email
                        )));
                    }
                }
                investor.change_email(email);
            }
        }

        if let Some(risk_profile) = update.risk_profile {
            investor.change_risk_profile(risk_profile);
        }

        self.investors.update(&investor).await?;

        tracing::info!(investor_id = %investor_id, "Investor profile updated");

        Ok(investor)
    }

    /// Replace the password after checking the current one
    pub async fn change_password(
        &self,
        investor_id: &UniqueEntityId,
        current: &str,
        new: &str,
    ) -> Result<(), AppError> {
        let mut investor = self.get_profile(investor_id).await?;

        if !self.hasher.compare(current, investor.password_hash())? {
            return Err(AppError::WrongCredentials);
        }

        let password = Password::create(new)?;
        investor.change_password_hash(self.hasher.hash(password.value())?);
        self.investors.update(&investor).await?;

        tracing::info!(investor_id = %investor_id, "Investor password changed");

        Ok(())
    }
}
