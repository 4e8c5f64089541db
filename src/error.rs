// Error types for the bookshelf client.
// Covers catalog API failures, configuration problems, and payload decoding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Catalog API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: missing or expired token")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
