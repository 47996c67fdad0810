//! Typed errors for the question search library.

use std::path::PathBuf;

use openai_client::OpenAIError;
use thiserror::Error;

/// Errors that can occur while loading data or serving a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Input file is unreadable, not valid JSON, or internally inconsistent.
    ///
    /// Fatal at load time.
    #[error("invalid data in {}: {reason}", .path.display())]
    DataFormat { path: PathBuf, reason: String },

    /// The embedding service call failed (network, auth, timeout, bad response).
    ///
    /// Fails the current search only.
    #[error("embedding service error: {0}")]
    EmbeddingService(#[from] OpenAIError),

    /// Query vector and indexed vectors have different lengths.
    #[error("dimension mismatch: index has {expected} dimensions, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid query provided
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}

impl SearchError {
    pub(crate) fn data_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
