//! Ownership checks shared by every mutation path on user-owned resources
//! (ideas, comments, reviews, notifications).

use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// True when the requester is the owner of the resource
pub fn is_owner(resource_owner_id: Uuid, requester_id: Uuid) -> bool {
    resource_owner_id == requester_id
}

/// Rejects with `Forbidden` unless the requester owns the resource.
///
/// `action` and `resource` only shape the message, e.g.
/// "You can only update your own comments".
pub fn ensure_owner(
    resource_owner_id: Uuid,
    requester_id: Uuid,
    action: &str,
    resource: &str,
) -> Result<()> {
    if is_owner(resource_owner_id, requester_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You can only {} your own {}",
            action, resource
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owner() {
        let owner = Uuid::new_v4();
        assert!(is_owner(owner, owner));
        assert!(!is_owner(owner, Uuid::new_v4()));
    }

    #[test]
    fn test_ensure_owner_message() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(owner, owner, "update", "comments").is_ok());

        let err = ensure_owner(owner, Uuid::new_v4(), "delete", "reviews").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(msg) if msg == "You can only delete your own reviews"));
    }
}
