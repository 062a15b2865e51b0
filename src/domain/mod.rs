//! Domain layer - entities, validation rules and repository traits

pub mod error;
pub mod image;
pub mod user;

pub use error::DomainError;
pub use image::{ImageMimeType, ImageStore, StoredImage};
pub use user::{User, UserProfile, UserRepository};
