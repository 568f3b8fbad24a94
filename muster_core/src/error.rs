//! Error types for the muster_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for muster_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event source loading/normalization error
    #[error("Event source error: {0}")]
    Source(String),

    /// Event operation error (lookup, CRUD, merge collisions)
    #[error("Event error: {0}")]
    Event(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
