use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::dtos::{MarkAllReadDto, NotificationResponseDto};
use crate::features::notifications::services::NotificationService;
use crate::shared::types::ApiResponse;

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notification",
    responses(
        (status = 200, description = "Notifications", body = ApiResponse<Vec<NotificationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>> {
    let notifications = service.list_for_user(user.user_id).await?;
    Ok(Json(ApiResponse::list(notifications)))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/api/notification/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = ApiResponse<NotificationResponseDto>),
        (status = 403, description = "Notification belongs to someone else"),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NotificationResponseDto>>> {
    let notification = service.mark_read(user.user_id, id).await?;
    Ok(Json(ApiResponse::success(Some(notification), None, None)))
}

/// Mark all of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/api/notification/read-all",
    responses(
        (status = 200, description = "Notifications marked read", body = ApiResponse<MarkAllReadDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_notifications_read(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<MarkAllReadDto>>> {
    let updated = service.mark_all_read(user.user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(MarkAllReadDto { updated }),
        Some(format!("{} notifications marked as read", updated)),
        None,
    )))
}
