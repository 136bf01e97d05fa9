//! Review rules: one review per manager per idea, feedback is mandatory,
//! and only the reviewer may change or withdraw a review.

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::policy::ensure_owner;
use crate::features::reviews::models::{Review, ReviewDecision};

/// Checks a review body, returning trimmed feedback and the parsed decision.
///
/// Feedback is checked first, then the decision.
pub fn validate_review(feedback: &str, decision: &str) -> Result<(String, ReviewDecision)> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(AppError::Validation("Feedback is required".to_string()));
    }

    let decision = decision
        .parse::<ReviewDecision>()
        .map_err(AppError::Validation)?;

    Ok((feedback.to_string(), decision))
}

pub fn ensure_not_reviewed(already_reviewed: bool) -> Result<()> {
    if already_reviewed {
        return Err(duplicate_review());
    }
    Ok(())
}

pub fn duplicate_review() -> AppError {
    AppError::DuplicateAction("You have already submitted a review for this idea".to_string())
}

pub fn ensure_reviewer(review: &Review, requester_id: Uuid, action: &str) -> Result<()> {
    ensure_owner(review.reviewer_id, requester_id, action, "reviews")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_feedback_is_required() {
        let err = validate_review("   ", "Approve").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Feedback is required"));

        // Feedback is reported before an invalid decision
        let err = validate_review("", "Maybe").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Feedback is required"));
    }

    #[test]
    fn test_decision_is_parsed() {
        let (feedback, decision) = validate_review(" Solid plan ", "reject").unwrap();
        assert_eq!(feedback, "Solid plan");
        assert_eq!(decision, ReviewDecision::Reject);

        assert!(matches!(
            validate_review("Solid plan", "Postpone"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_second_review_is_duplicate() {
        assert!(ensure_not_reviewed(false).is_ok());
        assert!(matches!(
            ensure_not_reviewed(true),
            Err(AppError::DuplicateAction(_))
        ));
    }

    #[test]
    fn test_only_reviewer_may_change_review() {
        let reviewer = Uuid::new_v4();
        let review = Review {
            id: Uuid::new_v4(),
            idea_id: Uuid::new_v4(),
            reviewer_id: reviewer,
            feedback: "Needs a budget".to_string(),
            decision: ReviewDecision::Reject,
            review_date: Utc::now(),
        };

        assert!(ensure_reviewer(&review, reviewer, "update").is_ok());
        let err = ensure_reviewer(&review, Uuid::new_v4(), "delete").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(msg) if msg == "You can only delete your own reviews"));
    }
}
