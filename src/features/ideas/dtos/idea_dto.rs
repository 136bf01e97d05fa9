use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::comments::dtos::CommentResponseDto;
use crate::features::ideas::models::{IdeaRow, IdeaStatus};

/// Request DTO for submitting or editing an idea
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct IdeaRequestDto {
    #[validate(length(
        min = 5,
        max = 200,
        message = "Title must be between 5 and 200 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 100,
        message = "Description must be between 10 and 100 characters"
    ))]
    pub description: String,
    pub category_id: Uuid,
}

impl IdeaRequestDto {
    /// Title and description without surrounding whitespace; length rules
    /// apply to this form
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category_id: self.category_id,
        }
    }
}

/// Response DTO for idea, with vote tallies and comments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub submitted_by_user_id: Uuid,
    pub submitted_by_user_name: String,
    pub submitted_date: DateTime<Utc>,
    pub status: IdeaStatus,
    pub upvotes: i64,
    pub downvotes: i64,
    pub comments: Vec<CommentResponseDto>,
}

impl IdeaResponseDto {
    pub fn from_row(row: IdeaRow, comments: Vec<CommentResponseDto>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category_id: row.category_id,
            category_name: row.category_name,
            submitted_by_user_id: row.submitted_by_user_id,
            submitted_by_user_name: row.submitted_by_user_name,
            submitted_date: row.submitted_date,
            status: row.status,
            upvotes: row.upvotes,
            downvotes: row.downvotes,
            comments,
        }
    }
}

/// Request DTO for a manager moving an idea to another status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangeIdeaStatusDto {
    /// Draft, UnderReview or Approved (case-insensitive)
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn request(title: &str, description: &str) -> IdeaRequestDto {
        IdeaRequestDto {
            title: title.to_string(),
            description: description.to_string(),
            category_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_title_and_description_bounds() {
        assert!(request("Solar", "Ten chars!").validate().is_ok());
        assert!(request("Sol", "Long enough description").validate().is_err());
        assert!(request("Solar roof", "too short").validate().is_err());
        assert!(request(&"t".repeat(201), "Long enough description")
            .validate()
            .is_err());
        assert!(request("Solar roof", &"d".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_bounds_apply_after_trimming() {
        let padded = request("    x", "   Ten chars!   ");
        assert!(padded.validate().is_ok());
        assert!(padded.trimmed().validate().is_err());

        let dto = request("  Solar roof  ", "  Long enough description ").trimmed();
        assert_eq!(dto.title, "Solar roof");
        assert_eq!(dto.description, "Long enough description");
        assert!(dto.validate().is_ok());

        assert!(request("Solar", &format!("{}  ", "d".repeat(10)))
            .trimmed()
            .validate()
            .is_ok());
        assert!(request("Solar", "     short     ").trimmed().validate().is_err());
    }

    #[test]
    fn test_generated_request_is_valid() {
        let title: String = Sentence(2..4).fake();
        let dto = request(&format!("Idea: {}", title), "A short enough pitch");
        assert!(dto.validate().is_ok());
    }
}
