//! Role-based authorization guards for the application.
//!
//! These guards extract the authenticated user and verify they hold the
//! required role. Roles are not hierarchical: each area of the board belongs
//! to exactly one role.
//!
//! - Employee: submits ideas and comments on them
//! - Manager: reviews ideas and moves them through their lifecycle
//! - Admin: manages users and categories

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::models::UserRole;
use axum::{extract::FromRequestParts, http::request::Parts};

fn require_role(parts: &Parts, role: UserRole) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if !user.has_role(role) {
        return Err(AppError::Forbidden(format!("{} access required", role)));
    }

    Ok(user.clone())
}

/// Guard for employee-only endpoints (ideas, comments).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireEmployee(user): RequireEmployee) { ... }
/// ```
pub struct RequireEmployee(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireEmployee
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Employee).map(RequireEmployee)
    }
}

/// Guard for manager-only endpoints (reviews, status changes).
pub struct RequireManager(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireManager
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Manager).map(RequireManager)
    }
}

/// Guard for admin-only endpoints (user management, categories).
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Admin).map(RequireAdmin)
    }
}
