//! Error types for roe-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Definition {0} carries no seed link")]
    MissingSeedLink(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
