use thiserror::Error;

/// Errors produced by the cloud layer.
#[derive(Error, Debug)]
pub enum CloudError {
    /// Local file I/O error (reading a capture, writing a blob).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// (De)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Object path escapes the store or is otherwise malformed.
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    /// Refusing to store a zero-byte object.
    #[error("Empty object")]
    EmptyObject,

    /// Object exceeds the configured size limit.
    #[error("Object too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CloudError>;
