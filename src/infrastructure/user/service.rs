//! User service for account management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{
    validate_email, validate_full_name, validate_password, User, UserChanges, UserProfile,
    UserRepository, UserValidationError,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
///
/// Fields are optional so that absence can be reported as a validation failure
/// rather than a deserialization error.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request for updating an existing user, identified by email
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub new_password: Option<String>,
}

/// User service for account management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new user
    ///
    /// Checks run in a fixed order: presence, email, full name, password, uniqueness.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let (Some(full_name), Some(email), Some(password)) = (
            provided(request.full_name),
            provided(request.email),
            provided(request.password),
        ) else {
            return Err(invalid(UserValidationError::MissingRequiredFields));
        };

        validate_email(&email).map_err(invalid)?;
        validate_full_name(&full_name).map_err(invalid)?;
        validate_password(&password).map_err(invalid)?;

        let password_hash = self.hash_password(password).await?;
        let user = User::new(full_name, email, password_hash);

        // Uniqueness is decided by the store in the same operation as the insert
        let user = self.repository.create(user).await?;
        info!(email = %user.email(), "User created");

        Ok(user)
    }

    /// Update the full name and/or password of an existing user
    pub async fn update(&self, request: UpdateUserRequest) -> Result<User, DomainError> {
        let full_name = provided(request.full_name);
        let new_password = provided(request.new_password);

        let email = match provided(request.email) {
            Some(email) if full_name.is_some() || new_password.is_some() => email,
            _ => return Err(invalid(UserValidationError::MissingUpdateFields)),
        };

        if let Some(full_name) = &full_name {
            validate_full_name(full_name).map_err(invalid)?;
        }

        if let Some(new_password) = &new_password {
            validate_password(new_password)
                .map_err(|_| invalid(UserValidationError::InvalidNewPassword))?;
        }

        let password_hash = match new_password {
            Some(new_password) => Some(self.hash_password(new_password).await?),
            None => None,
        };

        let changes = UserChanges {
            full_name,
            password_hash,
        };

        let user = self
            .repository
            .update_fields(&email, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        info!(email = %user.email(), "User updated");

        Ok(user)
    }

    /// Delete a user by email, returning the removed record
    pub async fn delete(&self, email: Option<String>) -> Result<User, DomainError> {
        let email = provided(email).ok_or_else(|| invalid(UserValidationError::MissingDeleteEmail))?;

        let user = self
            .repository
            .delete_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        info!(email = %user.email(), "User deleted");

        Ok(user)
    }

    /// List all users without credential material
    pub async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        let users = self.repository.list_profiles().await?;
        debug!(count = users.len(), "Listed users");

        Ok(users)
    }

    /// Check that the backing store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }

    /// Argon2 is CPU-bound, so it runs on the blocking pool
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }
}

/// Absent and empty values both count as not provided
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn invalid(error: UserValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}
