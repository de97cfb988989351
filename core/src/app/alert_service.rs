//! Alert service
//!
//! Price alerts on assets. Evaluating a quote fires every matching active
//! alert once: its owner gets an alert notification and it is deactivated.
//! An alert whose notification cannot be stored stays active.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Alert, AlertProps, AlertType, Entity, Notification, NotificationProps, NotificationType,
    UniqueEntityId,
};
use crate::domain::ports::{AlertRepository, AssetRepository, NotificationRepository};
use crate::error::{AppError, ValidationError};

/// Alert fields to change; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateAlert {
    pub alert_type: Option<AlertType>,
    pub threshold: Option<Decimal>,
}

/// Service for managing and evaluating alerts
pub struct AlertService<AR, AS, NR>
where
    AR: AlertRepository,
    AS: AssetRepository,
    NR: NotificationRepository,
{
    alerts: Arc<AR>,
    assets: Arc<AS>,
    notifications: Arc<NR>,
}

impl<AR, AS, NR> AlertService<AR, AS, NR>
where
    AR: AlertRepository,
    AS: AssetRepository,
    NR: NotificationRepository,
{
    pub fn new(alerts: Arc<AR>, assets: Arc<AS>, notifications: Arc<NR>) -> Self {
        Self {
            alerts,
            assets,
            notifications,
        }
    }

    pub async fn create_alert(
        &self,
        user_id: &UniqueEntityId,
        asset_id: &UniqueEntityId,
        alert_type: AlertType,
        threshold: Decimal,
    ) -> Result<Alert, AppError> {
        if self.assets.find_by_id(asset_id).await?.is_none() {
            return Err(AppError::ResourceNotFound(format!("Asset {}", asset_id)));
        }

        let alert = Alert::create(
            AlertProps {
                user_id: user_id.clone(),
                asset_id: asset_id.clone(),
                alert_type,
                threshold,
                is_active: true,
                created_at: Utc::now(),
                updated_at: None,
            },
            None,
        )?;

        self.alerts.create(&alert).await?;

        tracing::info!(
            alert_id = %alert.id(),
            asset_id = %asset_id,
            alert_type = %alert_type,
            threshold = %threshold,
            "Alert created"
        );

        Ok(alert)
    }

    /// Change type and/or threshold of an active alert
    pub async fn update_alert(
        &self,
        user_id: &UniqueEntityId,
        alert_id: &UniqueEntityId,
        update: UpdateAlert,
    ) -> Result<Alert, AppError> {
        let mut alert = self.owned(user_id, alert_id).await?;

        if let Some(alert_type) = update.alert_type {
            alert.set_type(alert_type)?;
        }
        if let Some(threshold) = update.threshold {
            alert.set_threshold(threshold)?;
        }

        self.alerts.update(&alert).await?;
        Ok(alert)
    }

    pub async fn activate_alert(
        &self,
        user_id: &UniqueEntityId,
        alert_id: &UniqueEntityId,
    ) -> Result<Alert, AppError> {
        let mut alert = self.owned(user_id, alert_id).await?;
        alert.activate();
        self.alerts.update(&alert).await?;
        Ok(alert)
    }

    pub async fn deactivate_alert(
        &self,
        user_id: &UniqueEntityId,
        alert_id: &UniqueEntityId,
    ) -> Result<Alert, AppError> {
        let mut alert = self.owned(user_id, alert_id).await?;
        alert.deactivate();
        self.alerts.update(&alert).await?;
        Ok(alert)
    }

    pub async fn delete_alert(
        &self,
        user_id: &UniqueEntityId,
        alert_id: &UniqueEntityId,
    ) -> Result<(), AppError> {
        self.owned(user_id, alert_id).await?;
        self.alerts.delete(alert_id).await?;
        Ok(())
    }

    pub async fn list_alerts(&self, user_id: &UniqueEntityId) -> Result<Vec<Alert>, AppError> {
        Ok(self.alerts.find_many_by_user(user_id).await?)
    }

    /// Fire the asset's active alerts that `price` triggers
    ///
    /// `reference` is the price percent-change alerts compare against.
    /// Returns the notifications created, one per fired alert.
    pub async fn evaluate_price(
        &self,
        asset_id: &UniqueEntityId,
        price: Decimal,
        reference: Option<Decimal>,
    ) -> Result<Vec<Notification>, AppError> {
        if price < Decimal::ZERO {
            return Err(ValidationError::InvalidAlert(format!(
                "quoted price cannot be negative: {}",
                price
            ))
            .into());
        }

        let asset = self
            .assets
            .find_by_id(asset_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Asset {}", asset_id)))?;

        let alerts = self.alerts.find_active_by_asset(asset_id).await?;
        let mut fired = Vec::new();

        for mut alert in alerts {
            if !alert.is_triggered_by(price, reference) {
                continue;
            }

            let notification = Notification::create(
                NotificationProps {
                    user_id: alert.user_id().clone(),
                    kind: NotificationType::Alert,
                    title: format!("Price alert: {}", asset.symbol()),
                    message: format!(
                        "{} is at {} {} ({} {})",
                        asset.symbol(),
                        price,
                        asset.currency(),
                        alert.alert_type(),
                        alert.threshold()
                    ),
                    is_read: false,
                    created_at: Utc::now(),
                    read_at: None,
                },
                None,
            )?;

            // Deactivate only once the owner has been told
            self.notifications.create(&notification).await?;
            alert.deactivate();
            self.alerts.update(&alert).await?;

            tracing::info!(
                alert_id = %alert.id(),
                user_id = %alert.user_id(),
                asset = %asset.symbol(),
                price = %price,
                "Alert fired"
            );

            fired.push(notification);
        }

        tracing::debug!(
            asset = %asset.symbol(),
            fired = fired.len(),
            "Price evaluated against alerts"
        );

        Ok(fired)
    }

    async fn owned(
        &self,
        user_id: &UniqueEntityId,
        alert_id: &UniqueEntityId,
    ) -> Result<Alert, AppError> {
        let alert = self
            .alerts
            .find_by_id(alert_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Alert {}", alert_id)))?;

        if !alert.is_owned_by(user_id) {
            return Err(AppError::NotAllowed(
                "Alert belongs to another user".to_string(),
            ));
        }

        Ok(alert)
    }
}
