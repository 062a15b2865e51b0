//! Uploaded image types

use std::fmt;

use serde::Serialize;

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Gif,
}

impl ImageMimeType {
    /// Parse an accepted MIME type; anything else is rejected
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// File extension, taken from the MIME subtype
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

/// An image that has been written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Path of the written file, relative to the working directory when the
    /// upload directory is relative
    pub path: String,
    /// Generated file name
    pub file_name: String,
    pub mime_type: ImageMimeType,
    /// Size in bytes
    pub size: usize,
}
