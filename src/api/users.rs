//! User management endpoints

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{User, UserProfile};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Request to create a new user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserApiRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request to update a user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserApiRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Request to delete a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteUserApiRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub full_name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            full_name: user.full_name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Envelope carrying a single user
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

/// Envelope carrying the user listing
#[derive(Debug, Clone, Serialize)]
pub struct UserListEnvelope {
    pub message: String,
    pub users: Vec<UserProfile>,
}

/// Envelope with only a message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /user/create
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    debug!(email = ?request.email, "Creating user");

    let service_request = CreateUserRequest {
        full_name: request.full_name,
        email: request.email,
        password: request.password,
    };

    let user = state
        .user_service
        .create(service_request)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error creating user"))?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// PUT /user/update
pub async fn update_user(
    State(state): State<AppState>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    debug!(email = ?request.email, "Updating user");

    let service_request = UpdateUserRequest {
        email: request.email,
        full_name: request.full_name,
        new_password: request.new_password,
    };

    let user = state
        .user_service
        .update(service_request)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error updating user"))?;

    Ok(Json(UserEnvelope {
        message: "User updated successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

/// DELETE /user/delete
pub async fn delete_user(
    State(state): State<AppState>,
    Json(request): Json<DeleteUserApiRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(email = ?request.email, "Deleting user");

    state
        .user_service
        .delete(request.email)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error deleting user"))?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

/// GET /user/getAll
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListEnvelope>, ApiError> {
    debug!("Listing users");

    let users = state
        .user_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "Error retrieving users"))?;

    Ok(Json(UserListEnvelope {
        message: "Users retrieved successfully".to_string(),
        users,
    }))
}
