//! Authoritative in-session task collection and label namespace.

use crate::board::domain::{Label, StoreEvent, Task, TaskId, TaskStatus};
use crate::prefs::Preferences;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Authoritative collection of task entities for one session.
///
/// The store enforces identity uniqueness and nothing else; semantic
/// validation lives in the lifecycle controller. Every mutation
/// broadcasts a [`StoreEvent`] so presentation collaborators re-derive
/// any cached per-status groupings. Slow subscribers may observe lagged
/// receivers and should re-derive from [`TaskStore::list`] when that
/// happens.
#[derive(Debug, Clone)]
pub struct TaskStore {
    state: Arc<RwLock<StoreState>>,
    events: broadcast::Sender<StoreEvent>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: BTreeMap<TaskId, Task>,
    labels: Vec<Label>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (events, _initial_rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            events,
        }
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Returns all tasks ordered by id, archived ones included.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        self.read().tasks.values().cloned().collect()
    }

    /// Returns the task with the given id, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.read().tasks.get(&id).cloned()
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().tasks.len()
    }

    /// Returns `true` when no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().tasks.is_empty()
    }

    /// Inserts or replaces a task by id.
    pub fn upsert(&self, task: Task) {
        let id = task.id();
        self.write().tasks.insert(id, task);
        self.emit(StoreEvent::Upserted(id));
    }

    /// Removes a task; returns `true` when it was present.
    pub fn remove(&self, id: TaskId) -> bool {
        let removed = self.write().tasks.remove(&id).is_some();
        if removed {
            self.emit(StoreEvent::Removed(id));
        }
        removed
    }

    /// Replaces the whole collection from a remote fetch.
    pub fn replace_all(&self, tasks: Vec<Task>) {
        {
            let mut state = self.write();
            state.tasks = tasks.into_iter().map(|task| (task.id(), task)).collect();
        }
        self.emit(StoreEvent::Reloaded);
    }

    /// Returns the shared label namespace.
    #[must_use]
    pub fn known_labels(&self) -> Vec<Label> {
        self.read().labels.clone()
    }

    /// Adds labels whose names are not yet in the namespace.
    ///
    /// Names are case-sensitive; an existing name keeps its original
    /// color.
    pub fn merge_labels(&self, labels: &[Label]) {
        let mut state = self.write();
        for label in labels {
            if !state.labels.iter().any(|known| known.name() == label.name()) {
                state.labels.push(label.clone());
            }
        }
    }

    /// Replaces the label namespace from a remote fetch.
    pub fn replace_labels(&self, labels: Vec<Label>) {
        self.write().labels = labels;
    }

    /// Groups non-archived tasks into the five status columns.
    ///
    /// Archived tasks are excluded from every column regardless of their
    /// status value.
    #[must_use]
    pub fn columns(&self) -> Vec<(TaskStatus, Vec<Task>)> {
        self.columns_matching(|_| true)
    }

    /// Groups non-archived tasks into columns, honoring view preferences.
    ///
    /// With `hide_completed` set, the complete column is present but
    /// empty, so column order stays fixed for presentation.
    #[must_use]
    pub fn columns_with(&self, prefs: &Preferences) -> Vec<(TaskStatus, Vec<Task>)> {
        let hide_completed = prefs.hide_completed();
        self.columns_matching(move |status| {
            !(hide_completed && status == TaskStatus::Complete)
        })
    }

    /// Returns archived tasks ordered by id.
    #[must_use]
    pub fn archived(&self) -> Vec<Task> {
        self.read()
            .tasks
            .values()
            .filter(|task| task.archived())
            .cloned()
            .collect()
    }

    fn columns_matching(
        &self,
        include_status: impl Fn(TaskStatus) -> bool,
    ) -> Vec<(TaskStatus, Vec<Task>)> {
        let state = self.read();
        TaskStatus::COLUMN_ORDER
            .into_iter()
            .map(|status| {
                let tasks = if include_status(status) {
                    state
                        .tasks
                        .values()
                        .filter(|task| !task.archived() && task.status() == status)
                        .cloned()
                        .collect()
                } else {
                    Vec::new()
                };
                (status, tasks)
            })
            .collect()
    }

    fn emit(&self, event: StoreEvent) {
        // A send error only means nobody is subscribed right now.
        drop(self.events.send(event));
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
