use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    #[default]
    #[display("WELCOME")]
    Welcome,
    #[display("APPOINTMENT")]
    Appointment,
    #[display("STATUS_UPDATE")]
    StatusUpdate,
    #[display("REMINDER")]
    Reminder,
    #[display("PROMOTION")]
    Promotion,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_app_id: i64,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub appointment_id: Option<i64>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Notification synthesized by the dispatcher, not yet persisted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNotification {
    pub user_app_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub appointment_id: Option<i64>,
}
