//! Filter node errors

use delta_core::ExtractionError;
use delta_ports::StoreError;
use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Message field the node reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Identifier,
    Timestamp,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Identifier => "identifier",
            Field::Timestamp => "timestamp",
            Field::Value => "value",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Cannot extract {field}: {source}")]
    Extraction {
        field: Field,
        #[source]
        source: ExtractionError,
    },

    #[error("State store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type NodeResult<T> = std::result::Result<T, NodeError>;
