use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// User role enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Employee,
    Manager,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Employee, UserRole::Manager, UserRole::Admin];
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Employee => write!(f, "Employee"),
            UserRole::Manager => write!(f, "Manager"),
            UserRole::Admin => write!(f, "Admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| "Invalid role. Valid values are: Employee, Manager, Admin".to_string())
    }
}

/// User account status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err("Invalid status. Valid values are: Active, Inactive".to_string()),
        }
    }
}

/// Database model for user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

/// User row with activity counters, for the admin detail view
#[derive(Debug, Clone, FromRow)]
pub struct UserWithActivity {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_ignores_case() {
        assert_eq!("manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!(" Employee ".parse::<UserRole>(), Ok(UserRole::Employee));
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Inactive".parse::<UserStatus>(), Ok(UserStatus::Inactive));
        assert_eq!("active".parse::<UserStatus>(), Ok(UserStatus::Active));
        assert_eq!(
            "banned".parse::<UserStatus>(),
            Err("Invalid status. Valid values are: Active, Inactive".to_string())
        );
    }

    #[test]
    fn test_role_serializes_as_display_name() {
        assert_eq!(
            serde_json::to_string(&UserRole::Manager).unwrap(),
            "\"Manager\""
        );
    }
}
