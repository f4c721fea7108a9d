use thiserror::Error;

/// Errors surfaced by the operation layer.
///
/// Validation failures are raised synchronously, before any I/O is
/// attempted; storage failures pass through from the store layer.  Cloud
/// failures never appear here: by contract they degrade to local-only
/// outcomes inside the operations themselves.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or blank; shown to the user as a
    /// blocking prompt.
    #[error("{0}")]
    Validation(String),

    /// Local storage failure.
    #[error("Store error: {0}")]
    Store(#[from] fete_store::StoreError),

    /// The notification scheduler rejected a broadcast.
    #[error("Notification error: {0}")]
    Notify(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
