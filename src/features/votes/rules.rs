//! Vote transition rules.
//!
//! One vote per (idea, user). A downvote must carry a justification comment,
//! which is linked to the vote so it can be withdrawn together with it:
//!
//! | existing | requested | effect |
//! |----------|-----------|--------|
//! | none     | Upvote    | insert Upvote |
//! | none     | Downvote  | insert Downvote, add linked comment |
//! | Downvote | Upvote    | switch to Upvote, drop justification |
//! | Upvote   | Downvote  | switch to Downvote, add linked comment |
//! | same     | same      | `DuplicateAction` |
//!
//! The service loads the current rows, asks for a plan, and applies it in one
//! transaction.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::votes::models::VoteType;

pub const JUSTIFICATION_REQUIRED: &str =
    "Comment is mandatory when downvoting. Please provide a reason for your downvote.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteWrite {
    Insert(VoteType),
    Switch(VoteType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotePlan {
    pub write: VoteWrite,
    /// Justification to store, linked to the vote
    pub add_comment: Option<String>,
    /// Withdraw the comment that justified the previous downvote
    pub drop_justification: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalPlan {
    pub drop_justification: bool,
}

/// A comment by the voter on the voted idea, as far as the rules care
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentCandidate {
    pub id: Uuid,
    pub vote_id: Option<Uuid>,
    pub created_date: DateTime<Utc>,
}

/// Trimmed justification for a downvote; upvotes carry none
pub fn justification(requested: VoteType, comment: Option<&str>) -> Result<Option<String>> {
    match requested {
        VoteType::Upvote => Ok(None),
        VoteType::Downvote => comment
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Some(text.to_string()))
            .ok_or_else(|| AppError::Validation(JUSTIFICATION_REQUIRED.to_string())),
    }
}

pub fn plan_cast(
    existing: Option<VoteType>,
    requested: VoteType,
    comment: Option<&str>,
) -> Result<VotePlan> {
    let add_comment = justification(requested, comment)?;

    match existing {
        None => Ok(VotePlan {
            write: VoteWrite::Insert(requested),
            add_comment,
            drop_justification: false,
        }),
        Some(current) if current == requested => Err(AppError::DuplicateAction(format!(
            "You have already {}d this idea",
            requested.to_string().to_lowercase()
        ))),
        Some(current) => Ok(VotePlan {
            write: VoteWrite::Switch(requested),
            add_comment,
            drop_justification: current == VoteType::Downvote,
        }),
    }
}

pub fn plan_removal(existing: Option<VoteType>) -> Result<RemovalPlan> {
    let current = existing.ok_or_else(|| AppError::NotFound("Vote not found".to_string()))?;

    Ok(RemovalPlan {
        drop_justification: current == VoteType::Downvote,
    })
}

/// Display name of the voter. Every vote references a user row, so a voter
/// without one cannot vote in either direction.
pub fn voter_name(name: Option<String>) -> Result<String> {
    name.ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
}

/// Picks the comment to withdraw with a downvote: the newest one linked to
/// the vote. Unlinked comments are never chosen, so a justification the
/// voter already deleted leaves nothing to withdraw.
pub fn select_justification(candidates: &[CommentCandidate], vote_id: Uuid) -> Option<Uuid> {
    candidates
        .iter()
        .filter(|c| c.vote_id == Some(vote_id))
        .max_by_key(|c| c.created_date)
        .map(|c| c.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// In-memory stand-in for the votes and comments of one (idea, user) pair
    #[derive(Default)]
    struct Ledger {
        vote: Option<(Uuid, VoteType)>,
        comments: Vec<CommentCandidate>,
        clock: i64,
    }

    impl Ledger {
        fn tick(&mut self) -> DateTime<Utc> {
            self.clock += 1;
            DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(self.clock)
        }

        fn comment(&mut self, vote_id: Option<Uuid>) -> Uuid {
            let id = Uuid::new_v4();
            let created_date = self.tick();
            self.comments.push(CommentCandidate {
                id,
                vote_id,
                created_date,
            });
            id
        }

        fn drop_justification(&mut self, vote_id: Uuid) {
            if let Some(id) = select_justification(&self.comments, vote_id) {
                self.comments.retain(|c| c.id != id);
            }
        }

        fn cast(&mut self, requested: VoteType, comment: Option<&str>) -> Result<()> {
            let plan = plan_cast(self.vote.map(|(_, t)| t), requested, comment)?;
            let vote_id = match plan.write {
                VoteWrite::Insert(t) => {
                    let id = Uuid::new_v4();
                    self.vote = Some((id, t));
                    id
                }
                VoteWrite::Switch(t) => {
                    let (id, _) = self.vote.expect("switch needs a vote");
                    if plan.drop_justification {
                        self.drop_justification(id);
                    }
                    self.vote = Some((id, t));
                    id
                }
            };
            if plan.add_comment.is_some() {
                self.comment(Some(vote_id));
            }
            Ok(())
        }

        fn remove(&mut self) -> Result<()> {
            let plan = plan_removal(self.vote.map(|(_, t)| t))?;
            let (id, _) = self.vote.take().expect("removal needs a vote");
            if plan.drop_justification {
                self.drop_justification(id);
            }
            Ok(())
        }
    }

    #[test]
    fn test_transition_table() {
        use VoteType::*;

        let plan = plan_cast(None, Upvote, None).unwrap();
        assert_eq!(plan.write, VoteWrite::Insert(Upvote));
        assert_eq!(plan.add_comment, None);
        assert!(!plan.drop_justification);

        let plan = plan_cast(None, Downvote, Some(" too costly ")).unwrap();
        assert_eq!(plan.write, VoteWrite::Insert(Downvote));
        assert_eq!(plan.add_comment.as_deref(), Some("too costly"));

        let plan = plan_cast(Some(Downvote), Upvote, None).unwrap();
        assert_eq!(plan.write, VoteWrite::Switch(Upvote));
        assert!(plan.drop_justification);
        assert_eq!(plan.add_comment, None);

        let plan = plan_cast(Some(Upvote), Downvote, Some("changed my mind")).unwrap();
        assert_eq!(plan.write, VoteWrite::Switch(Downvote));
        assert!(!plan.drop_justification);
        assert_eq!(plan.add_comment.as_deref(), Some("changed my mind"));
    }

    #[test]
    fn test_same_vote_twice_is_duplicate() {
        let err = plan_cast(Some(VoteType::Upvote), VoteType::Upvote, None).unwrap_err();
        assert!(matches!(err, AppError::DuplicateAction(msg) if msg == "You have already upvoted this idea"));

        let err = plan_cast(Some(VoteType::Downvote), VoteType::Downvote, Some("again")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateAction(msg) if msg == "You have already downvoted this idea"));
    }

    #[test]
    fn test_downvote_without_comment_always_fails() {
        for existing in [None, Some(VoteType::Upvote), Some(VoteType::Downvote)] {
            for comment in [None, Some(""), Some("   \t")] {
                assert!(matches!(
                    plan_cast(existing, VoteType::Downvote, comment),
                    Err(AppError::Validation(_))
                ));
            }
        }
    }

    #[test]
    fn test_voter_without_user_row_is_unauthorized() {
        assert_eq!(voter_name(Some("Ana".to_string())).unwrap(), "Ana");
        assert!(matches!(voter_name(None), Err(AppError::Unauthorized(msg)) if msg == "User not found"));
    }

    #[test]
    fn test_removal_requires_a_vote() {
        assert!(matches!(plan_removal(None), Err(AppError::NotFound(_))));
        assert!(!plan_removal(Some(VoteType::Upvote)).unwrap().drop_justification);
        assert!(plan_removal(Some(VoteType::Downvote)).unwrap().drop_justification);
    }

    #[test]
    fn test_upvote_downvote_remove_scenario() {
        let mut ledger = Ledger::default();

        ledger.cast(VoteType::Upvote, None).unwrap();
        assert!(matches!(ledger.vote, Some((_, VoteType::Upvote))));
        assert_eq!(ledger.comments.len(), 0);

        ledger.cast(VoteType::Downvote, Some("Not feasible")).unwrap();
        assert!(matches!(ledger.vote, Some((_, VoteType::Downvote))));
        assert_eq!(ledger.comments.len(), 1);

        ledger.remove().unwrap();
        assert!(ledger.vote.is_none());
        assert_eq!(ledger.comments.len(), 0);
    }

    #[test]
    fn test_later_unrelated_comment_survives_vote_removal() {
        let mut ledger = Ledger::default();
        ledger.cast(VoteType::Downvote, Some("Too expensive")).unwrap();
        let justification = ledger.comments[0].id;
        let unrelated = ledger.comment(None);

        ledger.remove().unwrap();

        assert_eq!(ledger.comments.len(), 1);
        assert_eq!(ledger.comments[0].id, unrelated);
        assert_ne!(ledger.comments[0].id, justification);
    }

    #[test]
    fn test_switch_to_upvote_drops_only_the_justification() {
        let mut ledger = Ledger::default();
        let earlier = ledger.comment(None);
        ledger.cast(VoteType::Downvote, Some("Unclear benefit")).unwrap();
        let later = ledger.comment(None);

        ledger.cast(VoteType::Upvote, None).unwrap();

        let left: Vec<Uuid> = ledger.comments.iter().map(|c| c.id).collect();
        assert_eq!(left, vec![earlier, later]);
    }

    #[test]
    fn test_unlinked_comment_is_never_chosen() {
        let vote_id = Uuid::new_v4();
        let base = DateTime::<Utc>::UNIX_EPOCH;
        let unlinked = CommentCandidate {
            id: Uuid::new_v4(),
            vote_id: None,
            created_date: base + Duration::seconds(5),
        };
        let linked = CommentCandidate {
            id: Uuid::new_v4(),
            vote_id: Some(vote_id),
            created_date: base,
        };

        assert_eq!(select_justification(&[unlinked], vote_id), None);
        assert_eq!(select_justification(&[unlinked, linked], vote_id), Some(linked.id));
        assert_eq!(select_justification(&[], vote_id), None);
    }

    #[test]
    fn test_removal_after_deleting_justification_keeps_other_comments() {
        let mut ledger = Ledger::default();
        ledger.cast(VoteType::Downvote, Some("Too expensive")).unwrap();
        let justification = ledger.comments[0].id;
        let unrelated = ledger.comment(None);

        // The voter deletes their own justification through the comments API
        ledger.comments.retain(|c| c.id != justification);
        ledger.remove().unwrap();

        assert!(ledger.vote.is_none());
        let left: Vec<Uuid> = ledger.comments.iter().map(|c| c.id).collect();
        assert_eq!(left, vec![unrelated]);
    }

    #[test]
    fn test_switch_after_deleting_justification_keeps_other_comments() {
        let mut ledger = Ledger::default();
        ledger.cast(VoteType::Downvote, Some("Unclear benefit")).unwrap();
        let justification = ledger.comments[0].id;
        let unrelated = ledger.comment(None);

        ledger.comments.retain(|c| c.id != justification);
        ledger.cast(VoteType::Upvote, None).unwrap();

        assert!(matches!(ledger.vote, Some((_, VoteType::Upvote))));
        let left: Vec<Uuid> = ledger.comments.iter().map(|c| c.id).collect();
        assert_eq!(left, vec![unrelated]);
    }

    #[test]
    fn test_comment_linked_to_another_vote_is_ignored() {
        let vote_id = Uuid::new_v4();
        let foreign = CommentCandidate {
            id: Uuid::new_v4(),
            vote_id: Some(Uuid::new_v4()),
            created_date: DateTime::<Utc>::UNIX_EPOCH,
        };

        assert_eq!(select_justification(&[foreign], vote_id), None);
    }
}
