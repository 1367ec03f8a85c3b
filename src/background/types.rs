//! Common types for the background module

use std::path::PathBuf;
use thiserror::Error;

/// Background removal error types
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode PNG for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl BackgroundError {
    /// Input was missing, corrupt, or in an unsupported format
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::ImageNotFound(_) | Self::Decode { .. })
    }

    /// Output could not be produced at the requested path
    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Encode { .. })
    }
}

pub type Result<T> = std::result::Result<T, BackgroundError>;
