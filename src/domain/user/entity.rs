//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity, persisted as a document keyed by email
///
/// The password hash round-trips through storage but the entity is never serialized
/// into an API response directly; see `api::users::UserResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Letters and whitespace only
    full_name: String,
    /// Unique identifier for the user
    email: String,
    /// Salted Argon2 password hash in PHC string format
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The read-path projection of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }

    // Mutators

    /// Update the full name
    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Apply the supplied fields, leaving the others as they are
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(full_name) = changes.full_name {
            self.set_full_name(full_name);
        }

        if let Some(password_hash) = changes.password_hash {
            self.set_password_hash(password_hash);
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial update of a stored user; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub full_name: Option<String>,
    /// Already hashed
    pub password_hash: Option<String>,
}

/// Projection of a user returned by list queries; carries no credential material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
}
