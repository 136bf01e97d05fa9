use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Comment joined with its author's name
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
}
