use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Review decision enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "review_decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewDecision::Approve => write!(f, "Approve"),
            ReviewDecision::Reject => write!(f, "Reject"),
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(ReviewDecision::Approve),
            "reject" => Ok(ReviewDecision::Reject),
            _ => Err("Invalid decision. Valid values are: Approve, Reject".to_string()),
        }
    }
}

/// Database model for review
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub reviewer_id: Uuid,
    pub feedback: String,
    pub decision: ReviewDecision,
    pub review_date: DateTime<Utc>,
}

/// Review joined with the reviewer's name
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewer_name: String,
    pub feedback: String,
    pub decision: ReviewDecision,
    pub review_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_parsing() {
        assert_eq!("approve".parse::<ReviewDecision>(), Ok(ReviewDecision::Approve));
        assert_eq!(" REJECT ".parse::<ReviewDecision>(), Ok(ReviewDecision::Reject));
        assert_eq!(
            "maybe".parse::<ReviewDecision>(),
            Err("Invalid decision. Valid values are: Approve, Reject".to_string())
        );
    }
}
