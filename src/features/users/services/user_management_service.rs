use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{
    RoleBreakdownDto, UserDetailResponseDto, UserResponseDto, UserStatisticsDto,
};
use crate::features::users::models::{User, UserRole, UserStatus, UserWithActivity};
use crate::shared::validation::normalize_whitespace;

const USER_COLUMNS: &str = "id, name, email, role, status";

/// Administration of user accounts: listing, lookup, role and status changes
pub struct UserManagementService {
    pool: PgPool,
}

impl UserManagementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<UserResponseDto>> {
        let users: Vec<User> =
            sqlx::query_as(&format!("SELECT {} FROM users ORDER BY name", USER_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list users: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<UserResponseDto>> {
        let users: Vec<User> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE role = $1 ORDER BY name",
            USER_COLUMNS
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    pub async fn list_by_status(&self, status: UserStatus) -> Result<Vec<UserResponseDto>> {
        let users: Vec<User> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE status = $1 ORDER BY name",
            USER_COLUMNS
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    /// User with counts of ideas, comments, votes and reviews they authored
    pub async fn get_detail(&self, user_id: Uuid) -> Result<UserDetailResponseDto> {
        let user: Option<UserWithActivity> = sqlx::query_as(
            r#"
            SELECT u.id, u.name, u.email, u.role, u.status,
                   (SELECT COUNT(*) FROM ideas i WHERE i.submitted_by_user_id = u.id) AS ideas_submitted,
                   (SELECT COUNT(*) FROM comments c WHERE c.user_id = u.id) AS comments_posted,
                   (SELECT COUNT(*) FROM votes v WHERE v.user_id = u.id) AS votes_casted,
                   (SELECT COUNT(*) FROM reviews r WHERE r.reviewer_id = u.id) AS reviews_submitted
            FROM users u
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user detail: {:?}", e);
            AppError::Database(e)
        })?;

        user.map(UserDetailResponseDto::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<UserResponseDto> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("Email cannot be empty".to_string()));
        }

        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        user.map(UserResponseDto::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Sets the status; returns the updated user and the previous status
    pub async fn set_status(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<(UserResponseDto, UserStatus)> {
        let user = self.find(user_id).await?;
        ensure_not_self_deactivation(actor_id, user_id, status)?;

        let previous = user.status;
        let updated = self.write_status(user_id, status).await?;

        tracing::info!(
            "User {} status changed from {} to {} by {}",
            user_id,
            previous,
            status,
            actor_id
        );

        Ok((updated.into(), previous))
    }

    pub async fn activate(&self, actor_id: Uuid, user_id: Uuid) -> Result<UserResponseDto> {
        let user = self.find(user_id).await?;
        if user.status == UserStatus::Active {
            return Err(AppError::Validation("User is already active".to_string()));
        }

        let updated = self.write_status(user_id, UserStatus::Active).await?;
        tracing::info!("User {} activated by {}", user_id, actor_id);

        Ok(updated.into())
    }

    pub async fn deactivate(&self, actor_id: Uuid, user_id: Uuid) -> Result<UserResponseDto> {
        let user = self.find(user_id).await?;
        ensure_not_self_deactivation(actor_id, user_id, UserStatus::Inactive)?;
        if user.status == UserStatus::Inactive {
            return Err(AppError::Validation("User is already inactive".to_string()));
        }

        let updated = self.write_status(user_id, UserStatus::Inactive).await?;
        tracing::info!("User {} deactivated by {}", user_id, actor_id);

        Ok(updated.into())
    }

    /// Sets the role; returns the updated user and the previous role
    pub async fn set_role(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<(UserResponseDto, UserRole)> {
        let user = self.find(user_id).await?;
        ensure_not_self_role_change(actor_id, user_id)?;

        let previous = user.role;
        let updated: User = sqlx::query_as(&format!(
            "UPDATE users SET role = $1 WHERE id = $2 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(role)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user role: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "User {} role changed from {} to {} by {}",
            user_id,
            previous,
            role,
            actor_id
        );

        Ok((updated.into(), previous))
    }

    pub async fn statistics(&self) -> Result<UserStatisticsDto> {
        let (total, active, inactive, employees, managers, admins): (i64, i64, i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE status = 'active'),
                       COUNT(*) FILTER (WHERE status = 'inactive'),
                       COUNT(*) FILTER (WHERE role = 'employee'),
                       COUNT(*) FILTER (WHERE role = 'manager'),
                       COUNT(*) FILTER (WHERE role = 'admin')
                FROM users
                "#,
            )
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(UserStatisticsDto {
            total_users: total,
            active_users: active,
            inactive_users: inactive,
            role_breakdown: RoleBreakdownDto {
                employees,
                managers,
                admins,
            },
        })
    }

    /// Case-insensitive substring search over name and email
    pub async fn search(&self, term: &str) -> Result<Vec<UserResponseDto>> {
        let term = normalize_whitespace(term);
        if term.is_empty() {
            return Err(AppError::Validation(
                "Search term cannot be empty".to_string(),
            ));
        }

        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let users: Vec<User> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM users
            WHERE LOWER(name) LIKE $1 ESCAPE '\' OR LOWER(email) LIKE $1 ESCAPE '\'
            ORDER BY name
            "#,
            USER_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if users.is_empty() {
            return Err(AppError::NotFound(
                "No users found matching the search criteria".to_string(),
            ));
        }

        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    async fn find(&self, user_id: Uuid) -> Result<User> {
        let user: Option<User> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        user.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn write_status(&self, user_id: Uuid, status: UserStatus) -> Result<User> {
        sqlx::query_as(&format!(
            "UPDATE users SET status = $1 WHERE id = $2 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(status)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user status: {:?}", e);
            AppError::Database(e)
        })
    }
}

/// An admin may not lock themselves out
fn ensure_not_self_deactivation(actor_id: Uuid, user_id: Uuid, status: UserStatus) -> Result<()> {
    if actor_id == user_id && status == UserStatus::Inactive {
        return Err(AppError::Validation(
            "You cannot deactivate your own account".to_string(),
        ));
    }
    Ok(())
}

fn ensure_not_self_role_change(actor_id: Uuid, user_id: Uuid) -> Result<()> {
    if actor_id == user_id {
        return Err(AppError::Validation(
            "You cannot change your own role".to_string(),
        ));
    }
    Ok(())
}

/// Escapes LIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_cannot_deactivate_self() {
        let admin = Uuid::new_v4();
        assert!(ensure_not_self_deactivation(admin, admin, UserStatus::Inactive).is_err());
        assert!(ensure_not_self_deactivation(admin, admin, UserStatus::Active).is_ok());
        assert!(ensure_not_self_deactivation(admin, Uuid::new_v4(), UserStatus::Inactive).is_ok());
    }

    #[test]
    fn test_admin_cannot_change_own_role() {
        let admin = Uuid::new_v4();
        assert!(matches!(
            ensure_not_self_role_change(admin, admin),
            Err(AppError::Validation(_))
        ));
        assert!(ensure_not_self_role_change(admin, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }
}
