//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserChanges, UserProfile};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations are document collections keyed by email. Each method must be atomic
/// on its own; in particular `create` must reject an existing email in the same
/// operation that inserts, so concurrent creates for one email cannot both succeed, and
/// `update_fields` must not read the record and write it back in separate steps.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with `DomainError::Conflict` if the email is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Apply `changes` to the stored user in one step, returning the updated record,
    /// or `None` if no user has this email. Fields not in `changes` are never rewritten.
    async fn update_fields(
        &self,
        email: &str,
        changes: UserChanges,
    ) -> Result<Option<User>, DomainError>;

    /// Find and remove a user in one step, returning the removed record
    async fn delete_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// List every user, projected to name and email
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
