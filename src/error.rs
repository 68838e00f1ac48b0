//! Error taxonomy for a conversion run. Every variant is fatal.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpgError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decompression error: {0}")]
    Decompression(String),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("serialization error: {0}")]
    Serialize(String),
    #[error("invalid timestamp {value:?}: {reason}")]
    TimestampParse { value: String, reason: String },
    #[error("failed to write {}: {source}", .path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EpgError {
    pub(crate) fn malformed(msg: impl std::fmt::Display) -> Self {
        EpgError::MalformedDocument(msg.to_string())
    }

    pub(crate) fn serialize(msg: impl std::fmt::Display) -> Self {
        EpgError::Serialize(msg.to_string())
    }

    pub(crate) fn timestamp(value: &str, reason: impl Into<String>) -> Self {
        EpgError::TimestampParse {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EpgError>;
