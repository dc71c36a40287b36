use thiserror::Error;

/// Unified error type for Floe crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Object not exists: {0}")]
    ObjectNotExists(String),
    #[error("Invalid object id: {0:?}")]
    InvalidObjectId(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Execution error: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors that only invalidate a single pointer file entry. Everything
    /// else aborts the current planning pass or reader.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Error::ObjectNotExists(_) | Error::InvalidObjectId(_))
    }
}
