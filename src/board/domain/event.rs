//! Change-notification events emitted by the board core.

use super::{TaskId, TaskStatus};

/// A committed status change on one task.
///
/// Emitted by the lifecycle controller after the remote store accepted the
/// change and the local store was updated. Carries the old and new status
/// so subscribers can react to specific edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    /// Task whose status changed.
    pub task_id: TaskId,
    /// Status before the change.
    pub from: TaskStatus,
    /// Status after the change.
    pub to: TaskStatus,
}

impl StatusTransition {
    /// Returns `true` when this transition entered the complete column.
    ///
    /// This is the single distinguished edge presentation uses for
    /// celebratory feedback. Leaving the complete column is an ordinary
    /// transition with no special handling.
    #[must_use]
    pub fn entered_complete(&self) -> bool {
        self.to == TaskStatus::Complete && self.from != TaskStatus::Complete
    }
}

/// Store-level change notification.
///
/// Every mutation of [`crate::board::store::TaskStore`] broadcasts one of
/// these so presentation collaborators re-derive any cached per-status
/// groupings instead of being re-rendered by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A task was inserted or replaced.
    Upserted(TaskId),
    /// A task was removed.
    Removed(TaskId),
    /// The whole collection was replaced from a remote fetch.
    Reloaded,
}
