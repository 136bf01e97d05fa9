use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{is_foreign_key_violation, is_unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::Category;

const CATEGORY_COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active categories, the ones ideas may be filed under
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories: Vec<Category> = sqlx::query_as(&format!(
            "SELECT {} FROM categories WHERE is_active = TRUE ORDER BY name",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List every category, active or not
    pub async fn list_all(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories: Vec<Category> = sqlx::query_as(&format!(
            "SELECT {} FROM categories ORDER BY name",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.find(id).await.map(|c| c.into())
    }

    pub async fn create(&self, dto: &CategoryRequestDto) -> Result<CategoryResponseDto> {
        let name = dto.normalized_name();
        if self.name_taken(&name, None).await? {
            return Err(AppError::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }

        let category: Category = sqlx::query_as(&format!(
            r#"
            INSERT INTO categories (id, name, description, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&name)
        .bind(dto.normalized_description())
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict("Category with this name already exists".to_string());
            }
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category created: {} ({})", category.name, category.id);
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: &CategoryRequestDto) -> Result<CategoryResponseDto> {
        self.find(id).await?;

        let name = dto.normalized_name();
        if self.name_taken(&name, Some(id)).await? {
            return Err(AppError::Conflict(
                "Another category with this name already exists".to_string(),
            ));
        }

        let category: Category = sqlx::query_as(&format!(
            r#"
            UPDATE categories
            SET name = $1, description = $2, is_active = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(&name)
        .bind(dto.normalized_description())
        .bind(dto.is_active)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(
                    "Another category with this name already exists".to_string(),
                );
            }
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category updated: {}", id);
        Ok(category.into())
    }

    /// Flip the active flag
    pub async fn toggle_status(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category: Option<Category> = sqlx::query_as(&format!(
            r#"
            UPDATE categories
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle category status: {:?}", e);
            AppError::Database(e)
        })?;

        let category =
            category.ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        tracing::info!(
            "Category {} is now {}",
            category.id,
            if category.is_active { "active" } else { "inactive" }
        );
        Ok(category.into())
    }

    /// Delete a category no idea refers to
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.find(id).await?;

        let in_use: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ideas WHERE category_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if in_use {
            return Err(category_in_use());
        }

        // The RESTRICT foreign key covers an idea filed between the check and the delete
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    return category_in_use();
                }
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Category deleted: {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Category> {
        let category: Option<Category> = sqlx::query_as(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?;

        category.ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    async fn name_taken(&self, name: &str, except: Option<Uuid>) -> Result<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE LOWER(name) = LOWER($1) AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(except)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

fn category_in_use() -> AppError {
    AppError::InvalidState("Cannot delete category as it is being used by ideas".to_string())
}
