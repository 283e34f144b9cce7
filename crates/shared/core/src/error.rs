use thiserror::Error;

/// Errors raised while pulling a field out of a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Value path and default value undefined")]
    NoPathNoDefault,

    #[error("Value path undefined: `{path}` has no field `{segment}`")]
    MissingField { path: String, segment: String },

    #[error("Value at `{path}` is not numeric: {found}")]
    NotNumeric { path: String, found: String },
}

pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;
