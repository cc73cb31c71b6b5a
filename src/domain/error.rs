//! Error types for the zmeals plugin.
//!
//! This module defines the centralized error type [`ZmealsError`] and a type alias
//! [`Result`] used across the plugin. Variants are derived with `thiserror`.

use thiserror::Error;

/// The main error type for zmeals operations.
///
/// Network failures, undecodable API bodies, preference storage problems and
/// configuration issues all surface through this enum. None of them are fatal:
/// the event handler turns them into a notice and keeps the previous view.
///
/// # Examples
///
/// ```
/// use zmeals::ZmealsError;
///
/// let err = ZmealsError::Api("HTTP 503".to_string());
/// assert_eq!(err.to_string(), "API error: HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum ZmealsError {
    /// The recipe API could not be reached or answered with a non-success status.
    #[error("API error: {0}")]
    Api(String),

    /// A response body was not the JSON shape the API documents.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Preference storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ZmealsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for zmeals operations.
pub type Result<T> = std::result::Result<T, ZmealsError>;
