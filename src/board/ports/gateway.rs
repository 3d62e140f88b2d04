//! Gateway port toward the remote task store.

use crate::board::domain::{Label, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type SyncResult<T> = Result<T, SyncGatewayError>;

/// Remote persistence contract.
///
/// One method per remote operation. Callers must await every mutating
/// call to completion before issuing a read, otherwise the local store
/// can transiently regress to pre-mutation state. A failed call implies
/// the remote mutation did not apply; the core never assumes partial
/// application and performs no automatic retry.
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Fetches every task, archived ones included.
    async fn fetch_all(&self) -> SyncResult<Vec<Task>>;

    /// Fetches the shared label namespace.
    async fn fetch_labels(&self) -> SyncResult<Vec<Label>>;

    /// Creates a task; the server assigns id and creation timestamp.
    async fn create(&self, draft: TaskDraft) -> SyncResult<Task>;

    /// Applies a partial-field edit and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncGatewayError::TaskNotFound`] when the id is unknown
    /// to the remote store.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> SyncResult<Task>;

    /// Moves a task to another status column.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> SyncResult<()>;

    /// Sets or clears the archived flag; the server assigns the archival
    /// timestamp.
    async fn update_archived(&self, id: TaskId, archived: bool) -> SyncResult<()>;

    /// Persists a new committed work total in whole seconds.
    async fn update_time_spent(&self, id: TaskId, seconds: u64) -> SyncResult<()>;

    /// Appends a comment; the server assigns the creation timestamp.
    async fn add_comment(&self, id: TaskId, text: &str) -> SyncResult<()>;

    /// Flips completion of the step at `step_index`.
    async fn toggle_step(&self, id: TaskId, step_index: usize) -> SyncResult<()>;

    /// Deletes a task irreversibly.
    async fn delete(&self, id: TaskId) -> SyncResult<()>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum SyncGatewayError {
    /// The remote store has no task with this id.
    #[error("remote store has no task {0}")]
    TaskNotFound(TaskId),

    /// The remote store rejected the request.
    #[error("remote store rejected the request with status {status}")]
    RemoteStatus {
        /// HTTP status code of the rejection.
        status: u16,
    },

    /// Transport-level failure before a response was obtained.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SyncGatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
