use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::ideas::dtos::IdeaResponseDto;
use crate::features::ideas::models::IdeaStatus;
use crate::features::ideas::IdeaService;
use crate::features::notifications::models::NotificationType;
use crate::features::notifications::NotificationService;
use crate::features::reviews::dtos::{IdeaReviewDetailDto, ReviewResponseDto};
use crate::features::reviews::models::{Review, ReviewDecision, ReviewRow};
use crate::features::reviews::policy;

const REVIEW_COLUMNS: &str = "id, idea_id, reviewer_id, feedback, decision, review_date";

const REVIEW_ROW_SELECT: &str = r#"
    SELECT r.id, r.idea_id, r.reviewer_id, u.name AS reviewer_name,
           r.feedback, r.decision, r.review_date
    FROM reviews r
    JOIN users u ON u.id = r.reviewer_id
"#;

/// Service for manager reviews and the manager's view of ideas
pub struct ReviewService {
    pool: PgPool,
    ideas: Arc<IdeaService>,
}

impl ReviewService {
    pub fn new(pool: PgPool, ideas: Arc<IdeaService>) -> Self {
        Self { pool, ideas }
    }

    /// Every idea with its comments and reviews, newest first
    pub async fn ideas_for_review(&self) -> Result<Vec<IdeaReviewDetailDto>> {
        let ideas = self.ideas.list_all().await?;
        self.with_reviews(ideas).await
    }

    pub async fn ideas_by_status(&self, status: IdeaStatus) -> Result<Vec<IdeaReviewDetailDto>> {
        let ideas = self.ideas.list_by_status(status).await?;
        self.with_reviews(ideas).await
    }

    pub async fn idea_for_review(&self, idea_id: Uuid) -> Result<IdeaReviewDetailDto> {
        let idea = self.ideas.get(idea_id).await?;
        self.with_reviews(vec![idea])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Idea not found".to_string()))
    }

    /// Returns the status the idea moved away from
    pub async fn change_idea_status(&self, idea_id: Uuid, next: IdeaStatus) -> Result<IdeaStatus> {
        self.ideas.change_status(idea_id, next).await
    }

    /// Record a manager's decision and notify the idea's submitter
    pub async fn submit(
        &self,
        reviewer_id: Uuid,
        idea_id: Uuid,
        feedback: &str,
        decision: ReviewDecision,
    ) -> Result<ReviewResponseDto> {
        let idea = self.ideas.find(idea_id).await?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let reviewer: Option<String> = sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
            .bind(reviewer_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let reviewer = reviewer.ok_or_else(|| AppError::Unauthorized("Manager not found".to_string()))?;

        let already_reviewed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE idea_id = $1 AND reviewer_id = $2)",
        )
        .bind(idea_id)
        .bind(reviewer_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;
        policy::ensure_not_reviewed(already_reviewed)?;

        let review: Review = sqlx::query_as(&format!(
            r#"
            INSERT INTO reviews (id, idea_id, reviewer_id, feedback, decision)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(idea_id)
        .bind(reviewer_id)
        .bind(feedback)
        .bind(decision)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return policy::duplicate_review();
            }
            tracing::error!("Failed to insert review: {:?}", e);
            AppError::Database(e)
        })?;

        NotificationService::notify_user(
            &mut *tx,
            idea.submitted_by_user_id,
            NotificationType::ReviewDecision,
            &format!(
                "Your idea \"{}\" was reviewed by {}: {}",
                idea.title, reviewer, decision
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Review {} ({}) submitted for idea {} by {}",
            review.id,
            decision,
            idea_id,
            reviewer_id
        );

        Ok(ReviewResponseDto {
            id: review.id,
            idea_id: review.idea_id,
            reviewer_id: review.reviewer_id,
            reviewer_name: reviewer,
            feedback: review.feedback,
            decision: review.decision,
            review_date: review.review_date,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<ReviewResponseDto> {
        let review: Option<ReviewRow> =
            sqlx::query_as(&format!("{} WHERE r.id = $1", REVIEW_ROW_SELECT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        review
            .map(|r| r.into())
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    /// Reviews of one idea, newest first
    pub async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<ReviewResponseDto>> {
        self.ideas.find(idea_id).await?;

        let reviews: Vec<ReviewRow> = sqlx::query_as(&format!(
            "{} WHERE r.idea_id = $1 ORDER BY r.review_date DESC",
            REVIEW_ROW_SELECT
        ))
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews for idea: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(reviews.into_iter().map(|r| r.into()).collect())
    }

    /// Reviews written by one manager, newest first
    pub async fn list_by_reviewer(&self, reviewer_id: Uuid) -> Result<Vec<ReviewResponseDto>> {
        let reviews: Vec<ReviewRow> = sqlx::query_as(&format!(
            "{} WHERE r.reviewer_id = $1 ORDER BY r.review_date DESC",
            REVIEW_ROW_SELECT
        ))
        .bind(reviewer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews by reviewer: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(reviews.into_iter().map(|r| r.into()).collect())
    }

    /// Replace feedback and decision; the review date moves to now
    pub async fn update(
        &self,
        reviewer_id: Uuid,
        id: Uuid,
        feedback: &str,
        decision: ReviewDecision,
    ) -> Result<ReviewResponseDto> {
        let review = self.find(id).await?;
        policy::ensure_reviewer(&review, reviewer_id, "update")?;

        sqlx::query(
            "UPDATE reviews SET feedback = $1, decision = $2, review_date = NOW() WHERE id = $3",
        )
        .bind(feedback)
        .bind(decision)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update review: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Review {} updated by {}", id, reviewer_id);
        self.get(id).await
    }

    pub async fn delete(&self, reviewer_id: Uuid, id: Uuid) -> Result<()> {
        let review = self.find(id).await?;
        policy::ensure_reviewer(&review, reviewer_id, "delete")?;

        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete review: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Review {} deleted by {}", id, reviewer_id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Review> {
        let review: Option<Review> =
            sqlx::query_as(&format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        review.ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    async fn with_reviews(&self, ideas: Vec<IdeaResponseDto>) -> Result<Vec<IdeaReviewDetailDto>> {
        if ideas.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = ideas.iter().map(|i| i.id).collect();
        let reviews: Vec<ReviewRow> = sqlx::query_as(&format!(
            "{} WHERE r.idea_id = ANY($1) ORDER BY r.review_date DESC",
            REVIEW_ROW_SELECT
        ))
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load reviews for ideas: {:?}", e);
            AppError::Database(e)
        })?;

        let mut by_idea: HashMap<Uuid, Vec<ReviewResponseDto>> = HashMap::new();
        for review in reviews {
            by_idea
                .entry(review.idea_id)
                .or_default()
                .push(review.into());
        }

        Ok(ideas
            .into_iter()
            .map(|idea| {
                let reviews = by_idea.remove(&idea.id).unwrap_or_default();
                IdeaReviewDetailDto { idea, reviews }
            })
            .collect())
    }
}
