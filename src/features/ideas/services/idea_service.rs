use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::comments::dtos::CommentResponseDto;
use crate::features::comments::models::CommentRow;
use crate::features::ideas::dtos::{IdeaRequestDto, IdeaResponseDto};
use crate::features::ideas::lifecycle;
use crate::features::ideas::models::{Idea, IdeaRow, IdeaStatus};
use crate::features::notifications::models::NotificationType;
use crate::features::notifications::NotificationService;
use crate::features::users::models::UserRole;

const IDEA_COLUMNS: &str = "id, title, submitted_by_user_id, status";

/// Idea joined with category, submitter and vote tallies; `{}` takes the WHERE clause
fn idea_rows_query(filter: &str) -> String {
    format!(
        r#"
        SELECT i.id, i.title, i.description, i.category_id, c.name AS category_name,
               i.submitted_by_user_id, u.name AS submitted_by_user_name,
               i.submitted_date, i.status,
               COUNT(v.id) FILTER (WHERE v.vote_type = 'upvote') AS upvotes,
               COUNT(v.id) FILTER (WHERE v.vote_type = 'downvote') AS downvotes
        FROM ideas i
        JOIN categories c ON c.id = i.category_id
        JOIN users u ON u.id = i.submitted_by_user_id
        LEFT JOIN votes v ON v.idea_id = i.id
        {}
        GROUP BY i.id, c.name, u.name
        ORDER BY i.submitted_date DESC
        "#,
        filter
    )
}

/// Service for idea submission, browsing and lifecycle
pub struct IdeaService {
    pool: PgPool,
}

impl IdeaService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All ideas, newest first
    pub async fn list_all(&self) -> Result<Vec<IdeaResponseDto>> {
        let rows: Vec<IdeaRow> = sqlx::query_as(&idea_rows_query(""))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list ideas: {:?}", e);
                AppError::Database(e)
            })?;

        self.with_comments(rows).await
    }

    /// Ideas submitted by one user, newest first
    pub async fn list_by_submitter(&self, user_id: Uuid) -> Result<Vec<IdeaResponseDto>> {
        let rows: Vec<IdeaRow> =
            sqlx::query_as(&idea_rows_query("WHERE i.submitted_by_user_id = $1"))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list ideas for user {}: {:?}", user_id, e);
                    AppError::Database(e)
                })?;

        self.with_comments(rows).await
    }

    pub async fn list_by_status(&self, status: IdeaStatus) -> Result<Vec<IdeaResponseDto>> {
        let rows: Vec<IdeaRow> = sqlx::query_as(&idea_rows_query("WHERE i.status = $1"))
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list ideas by status: {:?}", e);
                AppError::Database(e)
            })?;

        self.with_comments(rows).await
    }

    pub async fn get(&self, id: Uuid) -> Result<IdeaResponseDto> {
        let row: Option<IdeaRow> = sqlx::query_as(&idea_rows_query("WHERE i.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get idea: {:?}", e);
                AppError::Database(e)
            })?;

        let row = row.ok_or_else(|| AppError::NotFound("Idea not found".to_string()))?;

        self.with_comments(vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Idea not found".to_string()))
    }

    /// Plain idea row, for rule checks in this and other features
    pub async fn find(&self, id: Uuid) -> Result<Idea> {
        let idea: Option<Idea> =
            sqlx::query_as(&format!("SELECT {} FROM ideas WHERE id = $1", IDEA_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        idea.ok_or_else(|| AppError::NotFound("Idea not found".to_string()))
    }

    /// Submit a new idea and tell every active manager about it
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        dto: &IdeaRequestDto,
    ) -> Result<IdeaResponseDto> {
        self.check_category(dto.category_id).await?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let submitter: Option<String> = sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
            .bind(user.user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let submitter =
            submitter.ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        let idea: Idea = sqlx::query_as(&format!(
            r#"
            INSERT INTO ideas (id, title, description, category_id, submitted_by_user_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            IDEA_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.category_id)
        .bind(user.user_id)
        .bind(lifecycle::INITIAL_STATUS)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert idea: {:?}", e);
            AppError::Database(e)
        })?;

        let notified = NotificationService::notify_role(
            &mut *tx,
            UserRole::Manager,
            NotificationType::NewIdea,
            &format!("New idea submitted by {}: {}", submitter, idea.title),
        )
        .await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Idea {} submitted by {} ({} managers notified)",
            idea.id,
            user.user_id,
            notified
        );

        self.get(idea.id).await
    }

    /// Replace title, description and category; submitter only
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: &IdeaRequestDto,
    ) -> Result<IdeaResponseDto> {
        let idea = self.find(id).await?;
        lifecycle::ensure_can_update(&idea, user.user_id)?;
        self.check_category(dto.category_id).await?;

        sqlx::query("UPDATE ideas SET title = $1, description = $2, category_id = $3 WHERE id = $4")
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.category_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update idea: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Idea {} updated by {}", id, user.user_id);
        self.get(id).await
    }

    /// Delete a draft idea; submitter only
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let idea = self.find(id).await?;
        lifecycle::ensure_can_delete(&idea, user.user_id)?;

        // Status guard repeated in SQL so a concurrent status change wins
        let result = sqlx::query("DELETE FROM ideas WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(IdeaStatus::Draft)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete idea: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "You can only delete ideas in Draft status".to_string(),
            ));
        }

        tracing::info!("Idea {} deleted by {}", id, user.user_id);
        Ok(())
    }

    /// Move an idea along the status machine; returns the previous status
    pub async fn change_status(&self, id: Uuid, next: IdeaStatus) -> Result<IdeaStatus> {
        let idea = self.find(id).await?;
        lifecycle::ensure_transition(idea.status, next)?;

        let result = sqlx::query("UPDATE ideas SET status = $1 WHERE id = $2 AND status = $3")
            .bind(next)
            .bind(id)
            .bind(idea.status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to change idea status: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Idea status was changed by another request".to_string(),
            ));
        }

        tracing::info!("Idea {} status changed from {} to {}", id, idea.status, next);
        Ok(idea.status)
    }

    async fn check_category(&self, category_id: Uuid) -> Result<()> {
        let is_active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM categories WHERE id = $1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        lifecycle::ensure_category_active(is_active)
    }

    /// Loads comments for the given ideas in one query, keeping row order
    async fn with_comments(&self, rows: Vec<IdeaRow>) -> Result<Vec<IdeaResponseDto>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let comments: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.idea_id, c.user_id, u.name AS user_name, c.text, c.created_date
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.idea_id = ANY($1)
            ORDER BY c.created_date DESC
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load comments for ideas: {:?}", e);
            AppError::Database(e)
        })?;

        let mut by_idea: HashMap<Uuid, Vec<CommentResponseDto>> = HashMap::new();
        for comment in comments {
            by_idea
                .entry(comment.idea_id)
                .or_default()
                .push(comment.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let comments = by_idea.remove(&row.id).unwrap_or_default();
                IdeaResponseDto::from_row(row, comments)
            })
            .collect())
    }
}
