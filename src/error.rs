//! Error types shared across the crate.

use thiserror::Error;

/// Errors produced while loading production types or expanding a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message} at byte {position}")]
    Malformed { message: String, position: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>, position: usize) -> Self {
        Error::Malformed {
            message: message.into(),
            position,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
