//! Notification service

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{
    Entity, Notification, NotificationProps, NotificationType, UniqueEntityId,
};
use crate::domain::ports::NotificationRepository;
use crate::error::AppError;

pub struct NotificationService<NR: NotificationRepository> {
    notifications: Arc<NR>,
}

impl<NR: NotificationRepository> NotificationService<NR> {
    pub fn new(notifications: Arc<NR>) -> Self {
        Self { notifications }
    }

    pub async fn notify(
        &self,
        user_id: &UniqueEntityId,
        kind: NotificationType,
        title: &str,
        message: &str,
    ) -> Result<Notification, AppError> {
        let notification = Notification::create(
            NotificationProps {
                user_id: user_id.clone(),
                kind,
                title: title.to_string(),
                message: message.to_string(),
                is_read: false,
                created_at: Utc::now(),
                read_at: None,
            },
            None,
        )?;

        self.notifications.create(&notification).await?;

        tracing::debug!(
            notification_id = %notification.id(),
            user_id = %user_id,
            kind = %kind,
            "Notification created"
        );

        Ok(notification)
    }

    /// Mark one of the user's notifications as read
    ///
    /// Reading an already-read notification keeps its original `read_at`.
    pub async fn mark_as_read(
        &self,
        user_id: &UniqueEntityId,
        notification_id: &UniqueEntityId,
    ) -> Result<Notification, AppError> {
        let mut notification = self
            .notifications
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Notification {}", notification_id))
            })?;

        if !notification.is_owned_by(user_id) {
            return Err(AppError::NotAllowed(
                "Notification belongs to another user".to_string(),
            ));
        }

        if notification.is_read() {
            return Ok(notification);
        }

        notification.mark_as_read();
        self.notifications.update(&notification).await?;
        Ok(notification)
    }

    /// Returns how many notifications were marked
    pub async fn mark_all_as_read(&self, user_id: &UniqueEntityId) -> Result<usize, AppError> {
        let unread = self.notifications.find_many_unread_by_user(user_id).await?;
        for mut notification in unread.iter().cloned() {
            notification.mark_as_read();
            self.notifications.update(&notification).await?;
        }
        tracing::debug!(user_id = %user_id, count = unread.len(), "Notifications marked as read");
        Ok(unread.len())
    }

    pub async fn list_unread(
        &self,
        user_id: &UniqueEntityId,
    ) -> Result<Vec<Notification>, AppError> {
        Ok(self.notifications.find_many_unread_by_user(user_id).await?)
    }
}
