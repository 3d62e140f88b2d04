//! Port contract for durable local state documents.

use std::sync::Arc;
use thiserror::Error;

/// Result type for local store operations.
pub type LocalStoreResult<T> = Result<T, LocalStoreError>;

/// A single durable document of local state.
///
/// Each store instance owns exactly one document (the timer registry
/// snapshot, the user preferences). Documents survive process restarts
/// but carry no coordination protocol: when several processes share one
/// document, the last writer wins.
pub trait DocumentStore<T>: Send + Sync {
    /// Loads the document.
    ///
    /// Returns `Ok(None)` when no document has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError`] when the underlying storage cannot be
    /// read.
    fn load(&self) -> LocalStoreResult<Option<T>>;

    /// Replaces the document.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError`] when the document cannot be encoded or
    /// written.
    fn save(&self, value: &T) -> LocalStoreResult<()>;
}

/// Errors returned by local document stores.
#[derive(Debug, Clone, Error)]
pub enum LocalStoreError {
    /// The underlying storage failed.
    #[error("local storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),

    /// The document could not be encoded.
    #[error("local document encoding error: {0}")]
    Codec(Arc<serde_json::Error>),
}

impl LocalStoreError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Wraps an encoding error.
    pub fn codec(err: serde_json::Error) -> Self {
        Self::Codec(Arc::new(err))
    }
}
