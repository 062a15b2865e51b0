//! PostgreSQL user repository implementation
//!
//! Users are stored as JSONB documents in a `(key, data)` table where `key` is the email.
//! The primary key on `key` is what enforces email uniqueness.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserChanges, UserProfile, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let data = user_to_document(&user)?;

        sqlx::query(
            r#"
            INSERT INTO users (key, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.email())
        .bind(&data)
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("User already exists")
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update_fields(
        &self,
        email: &str,
        changes: UserChanges,
    ) -> Result<Option<User>, DomainError> {
        let updated_at = Utc::now();
        let patch = changes_to_document(&changes, updated_at)?;

        // `data || patch` merges inside the row update, so fields outside the patch keep
        // whatever a concurrent writer stored
        let row = sqlx::query(
            r#"
            UPDATE users
            SET data = data || $2, updated_at = $3
            WHERE md5(key) = md5($1) AND key = $1
            RETURNING data
            "#,
        )
        .bind(email)
        .bind(&patch)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("DELETE FROM users WHERE md5(key) = md5($1) AND key = $1 RETURNING data")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT data->>'fullName' AS full_name, key AS email
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut profiles = Vec::with_capacity(rows.len());

        for row in rows {
            let full_name: Option<String> = row.get("full_name");
            let email: String = row.get("email");

            profiles.push(UserProfile {
                full_name: full_name.unwrap_or_default(),
                email,
            });
        }

        Ok(profiles)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}

fn user_to_document(user: &User) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(user)
        .map_err(|e| DomainError::storage(format!("Failed to serialize user: {}", e)))
}

/// JSONB patch holding only the changed fields and the new `updatedAt`
fn changes_to_document(
    changes: &UserChanges,
    updated_at: DateTime<Utc>,
) -> Result<Value, DomainError> {
    let mut patch = Map::new();

    if let Some(full_name) = &changes.full_name {
        patch.insert("fullName".to_string(), Value::String(full_name.clone()));
    }

    if let Some(password_hash) = &changes.password_hash {
        patch.insert("passwordHash".to_string(), Value::String(password_hash.clone()));
    }

    let updated_at = serde_json::to_value(updated_at)
        .map_err(|e| DomainError::storage(format!("Failed to serialize timestamp: {}", e)))?;
    patch.insert("updatedAt".to_string(), updated_at);

    Ok(Value::Object(patch))
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let data: serde_json::Value = row.get("data");

    document_to_user(data)
}

fn document_to_user(data: serde_json::Value) -> Result<User, DomainError> {
    serde_json::from_value(data)
        .map_err(|e| DomainError::storage(format!("Failed to deserialize user: {}", e)))
}
