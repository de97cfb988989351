//! Notification domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Alert,
    Goal,
    Transaction,
    System,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Alert => write!(f, "alert"),
            NotificationType::Goal => write!(f, "goal"),
            NotificationType::Transaction => write!(f, "transaction"),
            NotificationType::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alert" => Ok(NotificationType::Alert),
            "goal" => Ok(NotificationType::Goal),
            "transaction" => Ok(NotificationType::Transaction),
            "system" => Ok(NotificationType::System),
            _ => Err(format!("Unknown notification type: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationProps {
    pub user_id: UniqueEntityId,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Notification {
    id: UniqueEntityId,
    props: NotificationProps,
}

impl Notification {
    pub fn create(
        mut props: NotificationProps,
        id: Option<UniqueEntityId>,
    ) -> Result<Self, ValidationError> {
        props.title = non_empty("title", &props.title)?;
        props.message = non_empty("message", &props.message)?;
        Ok(Self {
            id: UniqueEntityId::or_new(id),
            props,
        })
    }

    pub fn user_id(&self) -> &UniqueEntityId {
        &self.props.user_id
    }

    pub fn kind(&self) -> NotificationType {
        self.props.kind
    }

    pub fn title(&self) -> &str {
        &self.props.title
    }

    pub fn message(&self) -> &str {
        &self.props.message
    }

    pub fn is_read(&self) -> bool {
        self.props.is_read
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }

    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        self.props.read_at
    }

    pub fn is_owned_by(&self, user_id: &UniqueEntityId) -> bool {
        &self.props.user_id == user_id
    }

    pub fn set_read(&mut self, is_read: bool) {
        self.set_read_at(is_read, Utc::now());
    }

    /// Set the read flag; `read_at` is stamped with `now` the first time only
    ///
    /// Clearing the flag keeps the original `read_at`.
    pub fn set_read_at(&mut self, is_read: bool, now: DateTime<Utc>) {
        self.props.is_read = is_read;
        if is_read && self.props.read_at.is_none() {
            self.props.read_at = Some(now);
        }
    }

    pub fn mark_as_read(&mut self) {
        self.set_read(true);
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.props.title = non_empty("title", title)?;
        Ok(())
    }

    pub fn set_message(&mut self, message: &str) -> Result<(), ValidationError> {
        self.props.message = non_empty("message", message)?;
        Ok(())
    }
}

impl Entity for Notification {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}

fn non_empty(field: &str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::InvalidNotification(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(value.to_string())
}
