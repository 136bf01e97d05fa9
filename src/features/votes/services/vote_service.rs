use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::votes::dtos::VoteResponseDto;
use crate::features::votes::models::{Vote, VoteRow, VoteType};
use crate::features::votes::rules::{self, CommentCandidate, VoteWrite};

/// Service applying the vote rules against the store
pub struct VoteService {
    pool: PgPool,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Votes on an idea with voter names; an unknown idea simply has none
    pub async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<VoteResponseDto>> {
        let votes: Vec<VoteRow> = sqlx::query_as(
            r#"
            SELECT v.id, v.idea_id, v.user_id, u.name AS user_name, v.vote_type
            FROM votes v
            JOIN users u ON u.id = v.user_id
            WHERE v.idea_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list votes: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(votes.into_iter().map(|v| v.into()).collect())
    }

    pub async fn upvote(&self, user_id: Uuid, idea_id: Uuid) -> Result<VoteResponseDto> {
        self.cast(user_id, idea_id, VoteType::Upvote, None).await
    }

    pub async fn downvote(
        &self,
        user_id: Uuid,
        idea_id: Uuid,
        comment: Option<&str>,
    ) -> Result<VoteResponseDto> {
        // Reject a missing justification before touching the store
        rules::justification(VoteType::Downvote, comment)?;
        self.cast(user_id, idea_id, VoteType::Downvote, comment).await
    }

    /// Withdraw the caller's vote, and its justification when it was a downvote
    pub async fn remove(&self, user_id: Uuid, idea_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = find_vote(&mut *tx, idea_id, user_id).await?;
        let plan = rules::plan_removal(existing.as_ref().map(|v| v.vote_type))?;
        let vote = existing.ok_or_else(|| AppError::NotFound("Vote not found".to_string()))?;

        // Before the vote goes, or the link would already be cleared
        if plan.drop_justification {
            drop_justification(&mut *tx, &vote).await?;
        }

        sqlx::query("DELETE FROM votes WHERE id = $1")
            .bind(vote.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete vote: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("User {} removed {} on idea {}", user_id, vote.vote_type, idea_id);
        Ok(())
    }

    async fn cast(
        &self,
        user_id: Uuid,
        idea_id: Uuid,
        requested: VoteType,
        comment: Option<&str>,
    ) -> Result<VoteResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let idea_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ideas WHERE id = $1)")
            .bind(idea_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        if !idea_exists {
            return Err(AppError::NotFound("Idea not found".to_string()));
        }

        let user_name: Option<String> = sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let user_name = rules::voter_name(user_name)?;

        let existing = find_vote(&mut *tx, idea_id, user_id).await?;
        let plan = rules::plan_cast(existing.as_ref().map(|v| v.vote_type), requested, comment)?;

        let vote: Vote = match (plan.write, existing) {
            (VoteWrite::Switch(vote_type), Some(current)) => {
                if plan.drop_justification {
                    drop_justification(&mut *tx, &current).await?;
                }

                sqlx::query_as(
                    "UPDATE votes SET vote_type = $1 WHERE id = $2 RETURNING id, idea_id, user_id, vote_type",
                )
                .bind(vote_type)
                .bind(current.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to switch vote: {:?}", e);
                    AppError::Database(e)
                })?
            }
            (VoteWrite::Insert(vote_type), _) | (VoteWrite::Switch(vote_type), None) => {
                sqlx::query_as(
                    r#"
                    INSERT INTO votes (id, idea_id, user_id, vote_type)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, idea_id, user_id, vote_type
                    "#,
                )
                .bind(Uuid::now_v7())
                .bind(idea_id)
                .bind(user_id)
                .bind(vote_type)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    // Lost a race against a concurrent vote by the same user
                    if is_unique_violation(&e) {
                        return AppError::DuplicateAction(
                            "You have already voted on this idea".to_string(),
                        );
                    }
                    tracing::error!("Failed to insert vote: {:?}", e);
                    AppError::Database(e)
                })?
            }
        };

        if let Some(text) = plan.add_comment {
            sqlx::query(
                r#"
                INSERT INTO comments (id, idea_id, user_id, vote_id, text)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::now_v7())
            .bind(idea_id)
            .bind(user_id)
            .bind(vote.id)
            .bind(text)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert downvote comment: {:?}", e);
                AppError::Database(e)
            })?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("User {} cast {} on idea {}", user_id, vote.vote_type, idea_id);

        Ok(VoteResponseDto {
            id: vote.id,
            idea_id: vote.idea_id,
            user_id: vote.user_id,
            user_name,
            vote_type: vote.vote_type,
        })
    }
}

/// The caller's vote on the idea, locked for the rest of the transaction
async fn find_vote(conn: &mut PgConnection, idea_id: Uuid, user_id: Uuid) -> Result<Option<Vote>> {
    sqlx::query_as(
        r#"
        SELECT id, idea_id, user_id, vote_type
        FROM votes
        WHERE idea_id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(idea_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
    .map_err(AppError::Database)
}

async fn drop_justification(conn: &mut PgConnection, vote: &Vote) -> Result<()> {
    let candidates: Vec<CommentCandidate> = sqlx::query_as(
        r#"
        SELECT id, vote_id, created_date
        FROM comments
        WHERE vote_id = $1
        "#,
    )
    .bind(vote.id)
    .fetch_all(&mut *conn)
    .await
    .map_err(AppError::Database)?;

    let Some(comment_id) = rules::select_justification(&candidates, vote.id) else {
        tracing::warn!("No justification comment linked to downvote {}", vote.id);
        return Ok(());
    };

    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete downvote comment: {:?}", e);
            AppError::Database(e)
        })?;

    Ok(())
}
