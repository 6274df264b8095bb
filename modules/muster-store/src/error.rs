use muster_common::MusterError;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<StoreError> for MusterError {
    fn from(err: StoreError) -> Self {
        MusterError::Store(err.to_string())
    }
}
