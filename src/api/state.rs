//! Application state for shared services

use std::sync::Arc;

use crate::domain::image::ImageStore;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, User, UserProfile};
use crate::infrastructure::user::{
    CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub image_store: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            user_service,
            image_store,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn update(&self, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, email: Option<String>) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<UserProfile>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn update(&self, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, request).await
    }

    async fn delete(&self, email: Option<String>) -> Result<User, DomainError> {
        UserService::delete(self, email).await
    }

    async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        UserService::list(self).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        UserService::ping(self).await
    }
}
