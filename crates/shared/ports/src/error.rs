use thiserror::Error;

/// Failures of the external state store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read state for {identifier}: {reason}")]
    Read { identifier: String, reason: String },

    #[error("Failed to write state for {identifier}: {reason}")]
    Write { identifier: String, reason: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
