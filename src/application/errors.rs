use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Client-side rejection of a selection, raised before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported image format {0}")]
    InvalidFormat(String),

    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidFormat(mime) => {
                ApplicationError::ValidationError(ValidationError::InvalidFormat(mime))
            }
            DomainError::FileTooLarge { size, limit } => {
                ApplicationError::ValidationError(ValidationError::FileTooLarge { size, limit })
            }
            DomainError::Rejected(msg) => ApplicationError::ServiceError(msg),
            DomainError::Transport(msg) => ApplicationError::TransportError(msg),
            DomainError::InternalError(msg) => ApplicationError::InternalError(msg),
        }
    }
}
