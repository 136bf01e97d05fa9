use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::policy::ensure_owner;
use crate::features::notifications::dtos::NotificationResponseDto;
use crate::features::notifications::models::{Notification, NotificationStatus, NotificationType};
use crate::features::users::models::{UserRole, UserStatus};

const NOTIFICATION_COLUMNS: &str = "id, user_id, notification_type, message, status, created_date";

/// In-app notifications: read side for recipients, write side for other features
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Notify every active user holding `role`; runs on the caller's transaction
    pub async fn notify_role(
        conn: &mut PgConnection,
        role: UserRole,
        kind: NotificationType,
        message: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, notification_type, message, status)
            SELECT gen_random_uuid(), id, $1, $2, $3
            FROM users
            WHERE role = $4 AND status = $5
            "#,
        )
        .bind(kind)
        .bind(message)
        .bind(NotificationStatus::Unread)
        .bind(role)
        .bind(UserStatus::Active)
        .execute(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create {} notifications: {:?}", kind, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }

    /// Notify a single user; runs on the caller's transaction
    pub async fn notify_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        kind: NotificationType,
        message: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, notification_type, message, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(kind)
        .bind(message)
        .bind(NotificationStatus::Unread)
        .execute(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create {} notification: {:?}", kind, e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<NotificationResponseDto>> {
        let notifications: Vec<Notification> = sqlx::query_as(&format!(
            "SELECT {} FROM notifications WHERE user_id = $1 ORDER BY created_date DESC",
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }

    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<NotificationResponseDto> {
        let notification: Option<Notification> = sqlx::query_as(&format!(
            "SELECT {} FROM notifications WHERE id = $1",
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let notification =
            notification.ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;
        ensure_owner(notification.user_id, user_id, "read", "notifications")?;

        let updated: Notification = sqlx::query_as(&format!(
            "UPDATE notifications SET status = $1 WHERE id = $2 RETURNING {}",
            NOTIFICATION_COLUMNS
        ))
        .bind(NotificationStatus::Read)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notification read: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(updated.into())
    }

    /// Returns how many notifications changed state
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let result =
            sqlx::query("UPDATE notifications SET status = $1 WHERE user_id = $2 AND status = $3")
                .bind(NotificationStatus::Read)
                .bind(user_id)
                .bind(NotificationStatus::Unread)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to mark notifications read: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(result.rows_affected())
    }
}
