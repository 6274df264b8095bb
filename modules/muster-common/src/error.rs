use thiserror::Error;

use crate::types::{GatheringId, Role, UserId};

/// Result type alias for muster operations.
pub type Result<T> = std::result::Result<T, MusterError>;

#[derive(Debug, Error)]
pub enum MusterError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No such gathering: {0}")]
    NotFound(GatheringId),

    #[error("Not allowed: the {0} role is required")]
    Unauthorized(Role),

    #[error("{target} already holds the {role} role or higher")]
    AlreadyGranted { target: UserId, role: Role },

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
