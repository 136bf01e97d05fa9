use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::votes::models::{VoteRow, VoteType};

/// Response DTO for vote
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoteResponseDto {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub vote_type: VoteType,
}

impl From<VoteRow> for VoteResponseDto {
    fn from(v: VoteRow) -> Self {
        Self {
            id: v.id,
            idea_id: v.idea_id,
            user_id: v.user_id,
            user_name: v.user_name,
            vote_type: v.vote_type,
        }
    }
}

/// Request DTO for a downvote; the comment explains the objection
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DownvoteRequestDto {
    #[serde(default, alias = "commentText")]
    pub comment_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downvote_body_accepts_both_spellings() {
        let snake: DownvoteRequestDto =
            serde_json::from_str(r#"{"comment_text": "Too costly"}"#).unwrap();
        let camel: DownvoteRequestDto =
            serde_json::from_str(r#"{"commentText": "Too costly"}"#).unwrap();
        let empty: DownvoteRequestDto = serde_json::from_str("{}").unwrap();

        assert_eq!(snake.comment_text.as_deref(), Some("Too costly"));
        assert_eq!(camel.comment_text.as_deref(), Some("Too costly"));
        assert!(empty.comment_text.is_none());
    }
}
