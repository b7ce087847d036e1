//! Errors raised while loading an index. Searching never fails.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// A record could not be turned into a [`DocEntry`](crate::DocEntry).
    #[error("malformed entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error("search index must be a JSON array of entries")]
    NotAnArray,

    #[error("search index object has no \"docs\" array")]
    MissingDocs,

    #[error("invalid search index JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        IndexError::MalformedEntry {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
