use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Vote type enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "vote_type", rename_all = "snake_case")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteType::Upvote => write!(f, "Upvote"),
            VoteType::Downvote => write!(f, "Downvote"),
        }
    }
}

/// Database model for vote
#[derive(Debug, Clone, FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub vote_type: VoteType,
}

/// Vote joined with the voter's name
#[derive(Debug, Clone, FromRow)]
pub struct VoteRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub vote_type: VoteType,
}
