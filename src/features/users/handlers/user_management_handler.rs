use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{
    UpdateUserRoleDto, UpdateUserStatusDto, UserDetailResponseDto, UserResponseDto,
    UserStatisticsDto,
};
use crate::features::users::models::{UserRole, UserStatus};
use crate::features::users::services::UserManagementService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::validate_request;

/// List all users ordered by name
#[utoipa::path(
    get,
    path = "/api/usermanagement/users",
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list_all().await?;
    Ok(Json(ApiResponse::list(users)))
}

/// List users holding a role
#[utoipa::path(
    get,
    path = "/api/usermanagement/users/role/{role}",
    params(("role" = String, Path, description = "Employee, Manager or Admin (case-insensitive)")),
    responses(
        (status = 200, description = "Users with the role", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 400, description = "Invalid role"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn list_users_by_role(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(role): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let role = role.parse::<UserRole>().map_err(AppError::Validation)?;
    let users = service.list_by_role(role).await?;
    Ok(Json(ApiResponse::list(users)))
}

/// List users with an account status
#[utoipa::path(
    get,
    path = "/api/usermanagement/users/status/{status}",
    params(("status" = String, Path, description = "Active or Inactive (case-insensitive)")),
    responses(
        (status = 200, description = "Users with the status", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn list_users_by_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let status = status.parse::<UserStatus>().map_err(AppError::Validation)?;
    let users = service.list_by_status(status).await?;
    Ok(Json(ApiResponse::list(users)))
}

/// Get a user with activity counters
#[utoipa::path(
    get,
    path = "/api/usermanagement/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserDetailResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserDetailResponseDto>>> {
    let user = service.get_detail(user_id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Look a user up by email
#[utoipa::path(
    get,
    path = "/api/usermanagement/email/{email}",
    params(("email" = String, Path, description = "Email address (case-insensitive)")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn get_user_by_email(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.get_by_email(&email).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Set a user's status
#[utoipa::path(
    put,
    path = "/api/usermanagement/{user_id}/status",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Invalid status or self-deactivation"),
        (status = 404, description = "User not found")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn update_user_status(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(user_id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUserStatusDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    validate_request(&dto)?;
    let status = dto.status.parse::<UserStatus>().map_err(AppError::Validation)?;

    let (user, previous) = service.set_status(admin.user_id, user_id, status).await?;

    Ok(Json(ApiResponse::success(
        Some(user),
        Some(format!(
            "User status changed from {} to {}",
            previous, status
        )),
        None,
    )))
}

/// Activate a user account
#[utoipa::path(
    put,
    path = "/api/usermanagement/{user_id}/activate",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User activated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "User is already active"),
        (status = 404, description = "User not found")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn activate_user(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.activate(admin.user_id, user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("User activated successfully".to_string()),
        None,
    )))
}

/// Deactivate a user account
#[utoipa::path(
    put,
    path = "/api/usermanagement/{user_id}/deactivate",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Already inactive or self-deactivation"),
        (status = 404, description = "User not found")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.deactivate(admin.user_id, user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("User deactivated successfully".to_string()),
        None,
    )))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/usermanagement/{user_id}/role",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRoleDto,
    responses(
        (status = 200, description = "Role changed", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Invalid role or own role"),
        (status = 404, description = "User not found")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn update_user_role(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(user_id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUserRoleDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    validate_request(&dto)?;
    let role = dto.role.parse::<UserRole>().map_err(AppError::Validation)?;

    let (user, previous) = service.set_role(admin.user_id, user_id, role).await?;

    Ok(Json(ApiResponse::success(
        Some(user),
        Some(format!("User role changed from {} to {}", previous, role)),
        None,
    )))
}

/// User totals by status and role
#[utoipa::path(
    get,
    path = "/api/usermanagement/statistics/summary",
    responses(
        (status = 200, description = "User statistics", body = ApiResponse<UserStatisticsDto>),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn user_statistics(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
) -> Result<Json<ApiResponse<UserStatisticsDto>>> {
    let stats = service.statistics().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Search users by name or email
#[utoipa::path(
    get,
    path = "/api/usermanagement/search/{term}",
    params(("term" = String, Path, description = "Substring of name or email")),
    responses(
        (status = 200, description = "Matching users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 404, description = "No users matched")
    ),
    tag = "usermanagement",
    security(("bearer_auth" = []))
)]
pub async fn search_users(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserManagementService>>,
    Path(term): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.search(&term).await?;
    Ok(Json(ApiResponse::list(users)))
}
