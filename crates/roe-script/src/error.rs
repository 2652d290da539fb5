//! Error types for roe-script

use thiserror::Error;

/// Script loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON write error: {0}")]
    RonWrite(#[from] ron::Error),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error(transparent)]
    Core(roe_core::Error),
}

impl From<roe_core::Error> for Error {
    fn from(err: roe_core::Error) -> Self {
        match err {
            roe_core::Error::DuplicateDefinition(name) => Error::DuplicateDefinition(name),
            other => Error::Core(other),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
