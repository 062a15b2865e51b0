//! Image domain
//!
//! Types for profile image uploads and the trait for where they are written.

mod entity;
mod store;

pub use entity::{ImageMimeType, StoredImage};
pub use store::ImageStore;
