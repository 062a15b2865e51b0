//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, field validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserChanges, UserProfile};
pub use repository::UserRepository;
pub use validation::{
    is_valid, validate_email, validate_full_name, validate_password, FieldKind,
    UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
