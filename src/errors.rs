use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Custom error types for the harness
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{role} image not found: {}", .path.display())]
    ImageNotFound { role: String, path: PathBuf },

    #[error("Failed to read image {}: {source}", .path.display())]
    ImageRead { path: PathBuf, source: std::io::Error },

    #[error("Failed to decode image {}: {source}", .path.display())]
    ImageDecode { path: PathBuf, source: image::ImageError },

    #[error("Failed to write image {}: {source}", .path.display())]
    ImageEncode { path: PathBuf, source: image::ImageError },

    #[error("Need at least {required} images to create comparison, found {found}")]
    InsufficientScreenshots { found: usize, required: usize },

    #[error("Judgment service error: {0}")]
    Service(#[from] ServiceError),
}

/// Result type specific to harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Failures talking to the judgment service. These never reach the process
/// boundary as crashes; the judge folds them into an `ERROR` verdict.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse service response: {0}")]
    Envelope(String),
}
