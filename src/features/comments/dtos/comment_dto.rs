use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::comments::models::CommentRow;
use crate::shared::validation::validate_not_blank;

/// Response DTO for comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponseDto {
    fn from(c: CommentRow) -> Self {
        Self {
            id: c.id,
            idea_id: c.idea_id,
            user_id: c.user_id,
            user_name: c.user_name,
            text: c.text,
            created_date: c.created_date,
        }
    }
}

/// Request DTO for posting or editing a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CommentRequestDto {
    #[validate(custom(function = "validate_not_blank", message = "Comment text cannot be empty"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_comment_is_rejected() {
        let dto = CommentRequestDto {
            text: " \n ".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = CommentRequestDto {
            text: "Great idea".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
