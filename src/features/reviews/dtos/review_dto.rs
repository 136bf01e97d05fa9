use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::ideas::dtos::IdeaResponseDto;
use crate::features::reviews::models::{ReviewDecision, ReviewRow};

/// Response DTO for review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewer_name: String,
    pub feedback: String,
    pub decision: ReviewDecision,
    pub review_date: DateTime<Utc>,
}

impl From<ReviewRow> for ReviewResponseDto {
    fn from(r: ReviewRow) -> Self {
        Self {
            id: r.id,
            idea_id: r.idea_id,
            reviewer_id: r.reviewer_id,
            reviewer_name: r.reviewer_name,
            feedback: r.feedback,
            decision: r.decision,
            review_date: r.review_date,
        }
    }
}

/// Request DTO for submitting a review
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitReviewDto {
    pub idea_id: Uuid,
    pub feedback: String,
    /// Approve or Reject (case-insensitive)
    pub decision: String,
}

/// Request DTO for editing a review
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewRequestDto {
    pub feedback: String,
    /// Approve or Reject (case-insensitive)
    pub decision: String,
}

/// Idea as a manager sees it: the idea view plus every review on it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaReviewDetailDto {
    #[serde(flatten)]
    pub idea: IdeaResponseDto,
    pub reviews: Vec<ReviewResponseDto>,
}
