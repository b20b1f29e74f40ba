//! Service-level error kinds handed to the request boundary.
//!
//! # Invariants
//! - `NotFound` is only raised for the root entity of an operation.
//! - Storage problems never collapse into `NotFound`; they surface as
//!   `StorageFault` with the repository error as source.

use crate::model::ValidationError;
use crate::repo::RepoError;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Closed classification for boundary translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced id does not resolve. User-correctable.
    NotFound,
    /// Malformed input rejected before persistence. User-correctable.
    ValidationFailure,
    /// Storage or persisted-data failure. Not user-correctable.
    StorageFault,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("storage fault")]
    StorageFault(#[source] RepoError),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::StorageFault(_) => ErrorKind::StorageFault,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<RepoError> for CoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::StorageFault(other),
        }
    }
}
