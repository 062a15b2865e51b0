//! Image store trait

use async_trait::async_trait;
use bytes::Bytes;

use super::entity::{ImageMimeType, StoredImage};
use crate::domain::DomainError;

/// Destination for uploaded image files
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `content` under a name generated from `field_name`, the current time and
    /// the extension of `mime_type`. Never overwrites an existing file.
    async fn store(
        &self,
        field_name: &str,
        mime_type: ImageMimeType,
        content: Bytes,
    ) -> Result<StoredImage, DomainError>;
}
