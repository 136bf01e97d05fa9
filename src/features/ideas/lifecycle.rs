//! Rules governing an idea's life: which category it may be filed under,
//! who may change or remove it, and which status moves are legal.
//!
//! Everything here is a pure check over rows the service already loaded.

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::policy::ensure_owner;
use crate::features::ideas::models::{Idea, IdeaStatus};

/// Status given to every newly submitted idea
pub const INITIAL_STATUS: IdeaStatus = IdeaStatus::UnderReview;

/// `category_active` is `None` when the category does not exist
pub fn ensure_category_active(category_active: Option<bool>) -> Result<()> {
    match category_active {
        None => Err(AppError::NotFound("Category not found".to_string())),
        Some(false) => Err(AppError::InvalidState(
            "Selected category is inactive".to_string(),
        )),
        Some(true) => Ok(()),
    }
}

pub fn ensure_can_update(idea: &Idea, requester_id: Uuid) -> Result<()> {
    ensure_owner(idea.submitted_by_user_id, requester_id, "update", "ideas")
}

/// Only the submitter may delete, and only while the idea is still a draft
pub fn ensure_can_delete(idea: &Idea, requester_id: Uuid) -> Result<()> {
    ensure_owner(idea.submitted_by_user_id, requester_id, "delete", "ideas")?;

    if idea.status != IdeaStatus::Draft {
        return Err(AppError::InvalidState(
            "You can only delete ideas in Draft status".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_transition(current: IdeaStatus, next: IdeaStatus) -> Result<()> {
    if current == next {
        return Err(AppError::InvalidState(format!(
            "Idea is already {}",
            current
        )));
    }
    if !current.can_transition_to(next) {
        return Err(AppError::InvalidState(format!(
            "Cannot change idea status from {} to {}",
            current, next
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(owner: Uuid, status: IdeaStatus) -> Idea {
        Idea {
            id: Uuid::new_v4(),
            title: "Solar panels on the parking roof".to_string(),
            submitted_by_user_id: owner,
            status,
        }
    }

    #[test]
    fn test_inactive_category_rejects_submission() {
        assert!(matches!(
            ensure_category_active(Some(false)),
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            ensure_category_active(None),
            Err(AppError::NotFound(_))
        ));
        assert!(ensure_category_active(Some(true)).is_ok());
    }

    #[test]
    fn test_non_owner_cannot_update_or_delete() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let draft = idea(owner, IdeaStatus::Draft);

        assert!(matches!(
            ensure_can_update(&draft, stranger),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_can_delete(&draft, stranger),
            Err(AppError::Forbidden(_))
        ));
        assert!(ensure_can_update(&draft, owner).is_ok());
        assert!(ensure_can_delete(&draft, owner).is_ok());
    }

    #[test]
    fn test_delete_outside_draft_always_fails() {
        let owner = Uuid::new_v4();
        for status in [IdeaStatus::UnderReview, IdeaStatus::Approved] {
            let submitted = idea(owner, status);
            assert!(ensure_can_delete(&submitted, owner).is_err());
            assert!(ensure_can_delete(&submitted, Uuid::new_v4()).is_err());
        }
    }

    #[test]
    fn test_transitions() {
        assert!(ensure_transition(IdeaStatus::UnderReview, IdeaStatus::Approved).is_ok());
        assert!(ensure_transition(IdeaStatus::UnderReview, IdeaStatus::Draft).is_ok());
        assert!(ensure_transition(IdeaStatus::Draft, IdeaStatus::UnderReview).is_ok());

        let err = ensure_transition(IdeaStatus::Approved, IdeaStatus::Draft).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidState(msg) if msg == "Cannot change idea status from Approved to Draft"
        ));
        assert!(matches!(
            ensure_transition(IdeaStatus::Draft, IdeaStatus::Draft),
            Err(AppError::InvalidState(msg)) if msg == "Idea is already Draft"
        ));
        assert!(ensure_transition(IdeaStatus::Draft, IdeaStatus::Approved).is_err());
    }
}
