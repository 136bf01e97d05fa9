use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{User, UserRole, UserStatus, UserWithActivity};
use crate::shared::validation::validate_not_blank;

/// Response DTO for user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            status: u.status,
        }
    }
}

/// Response DTO for user with activity counters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetailResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub ideas_submitted: i64,
    pub comments_posted: i64,
    pub votes_casted: i64,
    pub reviews_submitted: i64,
}

impl From<UserWithActivity> for UserDetailResponseDto {
    fn from(u: UserWithActivity) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            status: u.status,
            ideas_submitted: u.ideas_submitted,
            comments_posted: u.comments_posted,
            votes_casted: u.votes_casted,
            reviews_submitted: u.reviews_submitted,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleBreakdownDto {
    pub employees: i64,
    pub managers: i64,
    pub admins: i64,
}

/// User population summary for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStatisticsDto {
    pub total_users: i64,
    pub active_users: i64,
    pub inactive_users: i64,
    pub role_breakdown: RoleBreakdownDto,
}

/// Request DTO for setting a user's status ("Active" or "Inactive")
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserStatusDto {
    #[validate(custom(function = "validate_not_blank", message = "Status is required"))]
    pub status: String,
}

/// Request DTO for setting a user's role ("Employee", "Manager" or "Admin")
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRoleDto {
    #[validate(custom(function = "validate_not_blank", message = "Role is required"))]
    pub role: String,
}
