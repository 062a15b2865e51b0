//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserChanges, UserProfile, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository, keyed by email
///
/// Every mutation takes the write lock for its whole check-and-write, which gives the
/// same single-record atomicity as the PostgreSQL implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.email().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    #[cfg(test)]
    pub(crate) async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.email()) {
            return Err(DomainError::conflict("User already exists"));
        }

        users.insert(user.email().to_string(), user.clone());
        Ok(user)
    }

    async fn update_fields(
        &self,
        email: &str,
        changes: UserChanges,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(email).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(email))
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().map(User::profile).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(full_name: &str, email: &str) -> User {
        User::new(full_name, email, "hashed_password")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("Jane Doe", "jane@example.com");

        repo.create(user.clone()).await.unwrap();

        assert_eq!(repo.get("jane@example.com").await, Some(user));
    }

    #[tokio::test]
    async fn test_email_uniqueness() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_test_user("Jane Doe", "jane@example.com"))
            .await
            .unwrap();

        let result = repo
            .create(create_test_user("Someone Else", "jane@example.com"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        let stored = repo.get("jane@example.com").await.unwrap();
        assert_eq!(stored.full_name(), "Jane Doe");
    }

    #[tokio::test]
    async fn test_concurrent_creates_admit_one() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(create_test_user("Jane Doe", "jane@example.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
    }

    fn name_change(full_name: &str) -> UserChanges {
        UserChanges {
            full_name: Some(full_name.to_string()),
            password_hash: None,
        }
    }

    fn password_change(password_hash: &str) -> UserChanges {
        UserChanges {
            full_name: None,
            password_hash: Some(password_hash.to_string()),
        }
    }

    #[tokio::test]
    async fn test_update_fields() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user(
            "Jane Doe",
            "jane@example.com",
        )]);

        let updated = repo
            .update_fields("jane@example.com", name_change("Jane Smith"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.full_name(), "Jane Smith");
        assert_eq!(updated.password_hash(), "hashed_password");
        assert_eq!(repo.get("jane@example.com").await, Some(updated));
    }

    #[tokio::test]
    async fn test_update_fields_missing_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update_fields("jane@example.com", name_change("Jane Smith"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(repo.get("jane@example.com").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_keep_both_fields() {
        for round in 0..32 {
            let repo = Arc::new(InMemoryUserRepository::with_users(vec![create_test_user(
                "Jane Doe",
                "jane@example.com",
            )]));
            let barrier = Arc::new(tokio::sync::Barrier::new(2));

            let rename = {
                let (repo, barrier) = (repo.clone(), barrier.clone());
                tokio::spawn(async move {
                    barrier.wait().await;
                    repo.update_fields("jane@example.com", name_change("Jane Smith"))
                        .await
                })
            };
            let rehash = {
                let (repo, barrier) = (repo.clone(), barrier.clone());
                tokio::spawn(async move {
                    barrier.wait().await;
                    repo.update_fields("jane@example.com", password_change("new_hash"))
                        .await
                })
            };

            assert!(rename.await.unwrap().unwrap().is_some());
            assert!(rehash.await.unwrap().unwrap().is_some());

            let stored = repo.get("jane@example.com").await.unwrap();
            assert_eq!(stored.full_name(), "Jane Smith", "round {round}");
            assert_eq!(stored.password_hash(), "new_hash", "round {round}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_update_racing_delete_never_resurrects() {
        for _ in 0..32 {
            let repo = Arc::new(InMemoryUserRepository::with_users(vec![create_test_user(
                "Jane Doe",
                "jane@example.com",
            )]));
            let barrier = Arc::new(tokio::sync::Barrier::new(2));

            let update = {
                let (repo, barrier) = (repo.clone(), barrier.clone());
                tokio::spawn(async move {
                    barrier.wait().await;
                    repo.update_fields("jane@example.com", name_change("Jane Smith"))
                        .await
                })
            };
            let delete = {
                let (repo, barrier) = (repo.clone(), barrier.clone());
                tokio::spawn(async move {
                    barrier.wait().await;
                    repo.delete_by_email("jane@example.com").await
                })
            };

            let updated = update.await.unwrap().unwrap();
            let deleted = delete.await.unwrap().unwrap().unwrap();

            // Either the update landed first and the delete removed the updated record,
            // or the delete won and the update found nothing.
            match updated {
                Some(_) => assert_eq!(deleted.full_name(), "Jane Smith"),
                None => assert_eq!(deleted.full_name(), "Jane Doe"),
            }
            assert!(repo.get("jane@example.com").await.is_none());
        }
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user(
            "Jane Doe",
            "jane@example.com",
        )]);

        let first = repo.delete_by_email("jane@example.com").await.unwrap();
        assert!(first.is_some());

        let second = repo.delete_by_email("jane@example.com").await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_list_profiles() {
        let repo = InMemoryUserRepository::with_users(vec![
            create_test_user("Bob", "bob@example.com"),
            create_test_user("Alice", "alice@example.com"),
        ]);

        let profiles = repo.list_profiles().await.unwrap();

        assert_eq!(
            profiles,
            vec![
                UserProfile {
                    full_name: "Alice".to_string(),
                    email: "alice@example.com".to_string(),
                },
                UserProfile {
                    full_name: "Bob".to_string(),
                    email: "bob@example.com".to_string(),
                },
            ]
        );
    }
}
