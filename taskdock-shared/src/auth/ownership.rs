/// Task ownership policy
///
/// This is the access-control core of taskdock: given a verified identity and
/// a task fetched from the store, decide whether the identity may read,
/// modify, or delete it.
///
/// # Policy
///
/// - Ownership comparison is exact string equality against the identity claim.
/// - A task with no owner (legacy/unowned rows) is never accessible to any
///   authenticated user; comparison against `None` never matches a real
///   username.
/// - Existence is checked by the caller *before* ownership, so a non-owner
///   receives a 403 for an existing task and a 404 for a missing one.
///
/// # Example
///
/// ```
/// use taskdock_shared::auth::ownership::ensure_owner;
/// use taskdock_shared::models::task::Task;
///
/// # fn example(task: &Task) {
/// match ensure_owner(task, "alice") {
///     Ok(()) => { /* proceed with the operation */ }
///     Err(_) => { /* map to 403 Forbidden */ }
/// }
/// # }
/// ```

use crate::models::task::Task;

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// The task exists but belongs to a different (or no) owner
    #[error("Task is not owned by the requesting user")]
    NotOwner,
}

/// Checks that `username` is the owner of `task`
///
/// # Errors
///
/// Returns `OwnershipError::NotOwner` when the task's owner differs from the
/// identity, or when the task has no owner at all.
pub fn ensure_owner(task: &Task, username: &str) -> Result<(), OwnershipError> {
    match task.owner.as_deref() {
        Some(owner) if owner == username => Ok(()),
        _ => Err(OwnershipError::NotOwner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn task_owned_by(owner: Option<&str>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "buy milk".to_string(),
            status: "pending".to_string(),
            owner: owner.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_is_allowed() {
        let task = task_owned_by(Some("alice"));
        assert!(ensure_owner(&task, "alice").is_ok());
    }

    #[test]
    fn test_non_owner_is_denied() {
        let task = task_owned_by(Some("alice"));
        assert!(matches!(
            ensure_owner(&task, "bob"),
            Err(OwnershipError::NotOwner)
        ));
    }

    #[test]
    fn test_comparison_is_exact() {
        let task = task_owned_by(Some("alice"));
        assert!(ensure_owner(&task, "Alice").is_err());
        assert!(ensure_owner(&task, "alice ").is_err());
        assert!(ensure_owner(&task, "").is_err());
    }

    #[test]
    fn test_unowned_task_is_denied_to_everyone() {
        // Legacy rows with no owner never match a real username
        let task = task_owned_by(None);
        assert!(ensure_owner(&task, "alice").is_err());
        assert!(ensure_owner(&task, "").is_err());
    }
}
