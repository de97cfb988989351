use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Entity, Notification, NotificationType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

pub fn present(notification: &Notification) -> NotificationView {
    NotificationView {
        id: notification.id().to_string(),
        user_id: notification.user_id().to_string(),
        kind: notification.kind(),
        title: notification.title().to_string(),
        message: notification.message().to_string(),
        is_read: notification.is_read(),
        created_at: notification.created_at(),
        read_at: notification.read_at(),
    }
}
