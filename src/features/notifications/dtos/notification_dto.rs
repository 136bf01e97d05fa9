use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::notifications::models::{
    Notification, NotificationStatus, NotificationType,
};

/// Response DTO for notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub notification_type: NotificationType,
    pub message: String,
    pub status: NotificationStatus,
    pub created_date: DateTime<Utc>,
}

impl From<Notification> for NotificationResponseDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            notification_type: n.notification_type,
            message: n.message,
            status: n.status,
            created_date: n.created_date,
        }
    }
}

/// Result of marking every notification as read
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkAllReadDto {
    pub updated: u64,
}
