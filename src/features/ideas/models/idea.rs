use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Idea status enum matching database enum
///
/// Transitions are validated by [`IdeaStatus::can_transition_to`]:
/// Draft -> UnderReview, UnderReview -> Draft, UnderReview -> Approved.
/// Approved is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "idea_status", rename_all = "snake_case")]
pub enum IdeaStatus {
    Draft,
    UnderReview,
    Approved,
}

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 3] = [
        IdeaStatus::Draft,
        IdeaStatus::UnderReview,
        IdeaStatus::Approved,
    ];

    pub fn can_transition_to(self, next: IdeaStatus) -> bool {
        matches!(
            (self, next),
            (IdeaStatus::Draft, IdeaStatus::UnderReview)
                | (IdeaStatus::UnderReview, IdeaStatus::Draft)
                | (IdeaStatus::UnderReview, IdeaStatus::Approved)
        )
    }

}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdeaStatus::Draft => write!(f, "Draft"),
            IdeaStatus::UnderReview => write!(f, "UnderReview"),
            IdeaStatus::Approved => write!(f, "Approved"),
        }
    }
}

impl FromStr for IdeaStatus {
    type Err = String;

    /// Case-insensitive; "under_review" and "Under Review" are accepted too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();

        IdeaStatus::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(&key))
            .ok_or_else(|| {
                "Invalid status. Valid values are: Draft, UnderReview, Approved".to_string()
            })
    }
}

/// The idea columns the ownership and status rules look at
#[derive(Debug, Clone, FromRow)]
pub struct Idea {
    pub id: Uuid,
    pub title: String,
    pub submitted_by_user_id: Uuid,
    pub status: IdeaStatus,
}

/// Idea joined with its category and submitter names and vote tallies
#[derive(Debug, Clone, FromRow)]
pub struct IdeaRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub submitted_by_user_id: Uuid,
    pub submitted_by_user_name: String,
    pub submitted_date: DateTime<Utc>,
    pub status: IdeaStatus,
    pub upvotes: i64,
    pub downvotes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use IdeaStatus::*;

        let allowed = [(Draft, UnderReview), (UnderReview, Draft), (UnderReview, Approved)];
        for from in IdeaStatus::ALL {
            for to in IdeaStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("underreview".parse::<IdeaStatus>(), Ok(IdeaStatus::UnderReview));
        assert_eq!("Under_Review".parse::<IdeaStatus>(), Ok(IdeaStatus::UnderReview));
        assert_eq!("APPROVED".parse::<IdeaStatus>(), Ok(IdeaStatus::Approved));
        assert_eq!(
            "Rejected".parse::<IdeaStatus>(),
            Err("Invalid status. Valid values are: Draft, UnderReview, Approved".to_string())
        );
    }

    #[test]
    fn test_status_serializes_as_variant_name() {
        assert_eq!(
            serde_json::to_string(&IdeaStatus::UnderReview).unwrap(),
            "\"UnderReview\""
        );
    }
}
