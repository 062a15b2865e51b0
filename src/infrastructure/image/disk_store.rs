//! Local filesystem image store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::image::{ImageMimeType, ImageStore, StoredImage};
use crate::domain::DomainError;

/// Give up after this many consecutive name collisions
const MAX_NAME_ATTEMPTS: i64 = 16;

/// Writes uploaded images into a single directory as `<field>-<millis>.<ext>`
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    directory: PathBuf,
}

impl DiskImageStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_directory(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.directory).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to create upload directory '{}': {}",
                self.directory.display(),
                e
            ))
        })
    }
}

/// `image-1700000000000.png`
pub fn generate_file_name(field_name: &str, timestamp_millis: i64, mime_type: ImageMimeType) -> String {
    format!("{}-{}.{}", field_name, timestamp_millis, mime_type.extension())
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(
        &self,
        field_name: &str,
        mime_type: ImageMimeType,
        content: Bytes,
    ) -> Result<StoredImage, DomainError> {
        self.ensure_directory().await?;

        let started_at = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = generate_file_name(field_name, started_at + attempt, mime_type);
            let path = self.directory.join(&file_name);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(DomainError::storage(format!(
                        "Failed to create '{}': {}",
                        path.display(),
                        e
                    )));
                }
            };

            if let Err(e) = write_all(&mut file, &content).await {
                let _ = fs::remove_file(&path).await;
                return Err(DomainError::storage(format!(
                    "Failed to write '{}': {}",
                    path.display(),
                    e
                )));
            }

            debug!(path = %path.display(), size = content.len(), "Stored uploaded image");

            return Ok(StoredImage {
                path: path.to_string_lossy().into_owned(),
                file_name,
                mime_type,
                size: content.len(),
            });
        }

        Err(DomainError::storage(format!(
            "Could not find a free file name for '{}' uploads",
            field_name
        )))
    }
}

async fn write_all(file: &mut fs::File, content: &[u8]) -> std::io::Result<()> {
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await
}
