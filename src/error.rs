//! Error types for readout card IDs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadoutError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl ReadoutError {
    /// True for malformed or out-of-range input, as opposed to I/O or runtime failures
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ReadoutError::ParseError(_))
    }
}

impl From<serde_json::Error> for ReadoutError {
    fn from(err: serde_json::Error) -> Self {
        ReadoutError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReadoutError>;
