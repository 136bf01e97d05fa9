use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::policy::ensure_owner;
use crate::features::comments::dtos::CommentResponseDto;
use crate::features::comments::models::CommentRow;

const COMMENT_ROW_SELECT: &str = r#"
    SELECT c.id, c.idea_id, c.user_id, u.name AS user_name, c.text, c.created_date
    FROM comments c
    JOIN users u ON u.id = c.user_id
"#;

/// Service for comments on ideas
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add(&self, user_id: Uuid, idea_id: Uuid, text: &str) -> Result<CommentResponseDto> {
        self.ensure_idea_exists(idea_id).await?;

        let user_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if !user_exists {
            return Err(AppError::Unauthorized("User not found".to_string()));
        }

        let comment_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO comments (id, idea_id, user_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(idea_id)
        .bind(user_id)
        .bind(text.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert comment: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Comment {} added to idea {} by {}", comment_id, idea_id, user_id);
        self.get(comment_id).await
    }

    /// Comments on an idea, newest first
    pub async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<CommentResponseDto>> {
        self.ensure_idea_exists(idea_id).await?;

        let comments: Vec<CommentRow> = sqlx::query_as(&format!(
            "{} WHERE c.idea_id = $1 ORDER BY c.created_date DESC",
            COMMENT_ROW_SELECT
        ))
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list comments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(comments.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CommentResponseDto> {
        let comment: Option<CommentRow> =
            sqlx::query_as(&format!("{} WHERE c.id = $1", COMMENT_ROW_SELECT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        comment
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Replace the text of the caller's own comment
    pub async fn update(&self, user_id: Uuid, id: Uuid, text: &str) -> Result<CommentResponseDto> {
        let author = self.find_author(id).await?;
        ensure_owner(author, user_id, "update", "comments")?;

        sqlx::query("UPDATE comments SET text = $1 WHERE id = $2")
            .bind(text.trim())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update comment: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Comment {} updated by {}", id, user_id);
        self.get(id).await
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let author = self.find_author(id).await?;
        ensure_owner(author, user_id, "delete", "comments")?;

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete comment: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Comment {} deleted by {}", id, user_id);
        Ok(())
    }

    async fn find_author(&self, id: Uuid) -> Result<Uuid> {
        let author: Option<Uuid> = sqlx::query_scalar("SELECT user_id FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        author.ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    async fn ensure_idea_exists(&self, idea_id: Uuid) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ideas WHERE id = $1)")
            .bind(idea_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound("Idea not found".to_string()));
        }
        Ok(())
    }
}
