//! Orchestration service for task lifecycle operations.

use crate::board::domain::{
    BoardDomainError, Label, StatusTransition, Step, Task, TaskDraft, TaskId, TaskPatch,
    TaskStatus,
};
use crate::board::ports::{SyncGateway, SyncGatewayError};
use crate::board::store::TaskStore;
use crate::local::{DocumentStore, LocalStoreError};
use crate::timer::{RegistrySnapshot, TimerRegistry};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

const TRANSITION_CHANNEL_CAPACITY: usize = 64;

/// Service-level errors for lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Local validation failed; nothing reached the network.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The task id is absent from the local store; nothing reached the
    /// network and no state was touched.
    #[error("no task {0} in the local store")]
    TaskNotFound(TaskId),

    /// The remote call failed; local state is unmodified.
    #[error(transparent)]
    Sync(#[from] SyncGatewayError),

    /// The timer snapshot document could not be updated.
    #[error(transparent)]
    Local(#[from] LocalStoreError),
}

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// The task lifecycle state machine and its side effects.
///
/// Every mutating operation awaits the sync gateway to completion before
/// touching the local store, so a failed remote call leaves local state
/// exactly as it was; no operation retries on its own. Status changes
/// are broadcast as [`StatusTransition`] events for presentation to
/// react to (entering the complete column is the one distinguished
/// edge).
///
/// Step operations address steps by their position in the stored
/// sequence. Positions are re-derived from the stored task on every
/// call, which is only stable while a single view edits the task; two
/// views editing concurrently can target the wrong step.
pub struct LifecycleController<G, C, S>
where
    G: SyncGateway,
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    store: TaskStore,
    gateway: Arc<G>,
    timers: TimerRegistry<C, S>,
    transitions: broadcast::Sender<StatusTransition>,
}

impl<G, C, S> LifecycleController<G, C, S>
where
    G: SyncGateway,
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    /// Creates a controller over the given store, gateway, and registry.
    #[must_use]
    pub fn new(store: TaskStore, gateway: Arc<G>, timers: TimerRegistry<C, S>) -> Self {
        let (transitions, _initial_rx) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);
        Self {
            store,
            gateway,
            timers,
            transitions,
        }
    }

    /// Returns the underlying task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the timer registry.
    #[must_use]
    pub const fn timers(&self) -> &TimerRegistry<C, S> {
        &self.timers
    }

    /// Subscribes to committed status transitions.
    #[must_use]
    pub fn subscribe_transitions(&self) -> broadcast::Receiver<StatusTransition> {
        self.transitions.subscribe()
    }

    /// Reconciles the local store from the remote task and label lists.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Sync`] when a fetch fails; the local
    /// store keeps its previous contents.
    pub async fn refresh(&self) -> LifecycleResult<()> {
        let tasks = self.gateway.fetch_all().await?;
        let labels = self.gateway.fetch_labels().await?;
        self.store.replace_labels(labels);
        self.store.replace_all(tasks);
        Ok(())
    }

    /// Creates a task from a draft.
    ///
    /// The remote store assigns the id; the task starts not-started and
    /// unarchived. New label names on the draft enter the shared
    /// namespace.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when the description or any
    /// initial step text is empty, or [`LifecycleError::Sync`] when the
    /// remote call fails.
    pub async fn create(&self, draft: TaskDraft) -> LifecycleResult<Task> {
        if draft.description().trim().is_empty() {
            return Err(BoardDomainError::EmptyDescription.into());
        }
        if draft.steps().iter().any(|text| text.trim().is_empty()) {
            return Err(BoardDomainError::EmptyStepText.into());
        }
        let task = self.gateway.create(draft).await?;
        self.store.merge_labels(task.labels());
        self.store.upsert(task.clone());
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Applies a partial-field edit.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when a replacement description
    /// or step text is empty, [`LifecycleError::TaskNotFound`] for an
    /// unknown id, or [`LifecycleError::Sync`] when the remote call
    /// fails.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> LifecycleResult<Task> {
        self.require(id)?;
        if patch.description().is_some_and(|text| text.trim().is_empty()) {
            return Err(BoardDomainError::EmptyDescription.into());
        }
        if patch
            .steps()
            .is_some_and(|steps| steps.iter().any(|step| step.text().trim().is_empty()))
        {
            return Err(BoardDomainError::EmptyStepText.into());
        }
        let updated = self.gateway.update(id, patch).await?;
        self.store.merge_labels(updated.labels());
        self.store.upsert(updated.clone());
        Ok(updated)
    }

    /// Moves a task to another column.
    ///
    /// Returns `Ok(None)` without any remote call or event when the
    /// status is unchanged. Otherwise the transition is broadcast after
    /// the change is committed locally.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id or
    /// [`LifecycleError::Sync`] when the remote call fails.
    pub async fn set_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> LifecycleResult<Option<StatusTransition>> {
        let mut task = self.require(id)?;
        if task.status() == status {
            return Ok(None);
        }
        self.gateway.update_status(id, status).await?;
        let transition = task.set_status(status);
        self.store.upsert(task);
        if let Some(event) = transition {
            tracing::debug!(
                task_id = %id,
                from = %event.from,
                to = %event.to,
                "status changed"
            );
            drop(self.transitions.send(event));
        }
        Ok(transition)
    }

    /// Archives a task.
    ///
    /// The server assigns the archival timestamp, so the local store is
    /// reconciled from a fresh fetch afterwards. A running timer for the
    /// task keeps running: timer lifecycle is independent of archive
    /// state, and stopping is the caller's deliberate decision.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id or
    /// [`LifecycleError::Sync`] when a remote call fails.
    pub async fn archive(&self, id: TaskId) -> LifecycleResult<()> {
        self.require(id)?;
        self.gateway.update_archived(id, true).await?;
        self.reload_tasks().await
    }

    /// Unarchives a task; it reappears in its status column unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id or
    /// [`LifecycleError::Sync`] when a remote call fails.
    pub async fn unarchive(&self, id: TaskId) -> LifecycleResult<()> {
        self.require(id)?;
        self.gateway.update_archived(id, false).await?;
        self.reload_tasks().await
    }

    /// Deletes a task irreversibly.
    ///
    /// A running timer for the task is discarded, not committed, so no
    /// registry entry dangles for the dead id.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id,
    /// [`LifecycleError::Sync`] when the remote call fails, or
    /// [`LifecycleError::Local`] when the timer snapshot cannot be
    /// updated.
    pub async fn delete(&self, id: TaskId) -> LifecycleResult<()> {
        self.require(id)?;
        self.gateway.delete(id).await?;
        self.store.remove(id);
        self.timers.discard(id)?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Appends a checklist step.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when the text is empty,
    /// [`LifecycleError::TaskNotFound`] for an unknown id, or
    /// [`LifecycleError::Sync`] when the remote call fails.
    pub async fn add_step(&self, id: TaskId, text: impl Into<String>) -> LifecycleResult<Task> {
        let mut task = self.require(id)?;
        task.add_step(Step::new(text)?);
        self.push_steps(id, &task).await
    }

    /// Flips completion of the step at `index`; all other steps and
    /// their order are untouched. Returns the new completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when `index` is out of range
    /// (stored state untouched, nothing sent), [`LifecycleError::TaskNotFound`]
    /// for an unknown id, or [`LifecycleError::Sync`] when the remote
    /// call fails.
    pub async fn toggle_step(&self, id: TaskId, index: usize) -> LifecycleResult<bool> {
        let mut task = self.require(id)?;
        let len = task.steps().len();
        if index >= len {
            return Err(BoardDomainError::StepIndexOutOfRange { index, len }.into());
        }
        self.gateway.toggle_step(id, index).await?;
        let completed = task.toggle_step(index)?;
        self.store.upsert(task);
        Ok(completed)
    }

    /// Rewrites the text of the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when `index` is out of range or
    /// the text is empty, [`LifecycleError::TaskNotFound`] for an unknown
    /// id, or [`LifecycleError::Sync`] when the remote call fails.
    pub async fn update_step_text(
        &self,
        id: TaskId,
        index: usize,
        text: impl Into<String>,
    ) -> LifecycleResult<Task> {
        let mut task = self.require(id)?;
        task.update_step_text(index, text)?;
        self.push_steps(id, &task).await
    }

    /// Removes the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when `index` is out of range,
    /// [`LifecycleError::TaskNotFound`] for an unknown id, or
    /// [`LifecycleError::Sync`] when the remote call fails.
    pub async fn delete_step(&self, id: TaskId, index: usize) -> LifecycleResult<Task> {
        let mut task = self.require(id)?;
        task.remove_step(index)?;
        self.push_steps(id, &task).await
    }

    /// Appends a comment.
    ///
    /// The server assigns the creation timestamp, so the local store is
    /// reconciled from a fresh fetch afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when the text is empty after
    /// trimming, [`LifecycleError::TaskNotFound`] for an unknown id, or
    /// [`LifecycleError::Sync`] when a remote call fails.
    pub async fn add_comment(&self, id: TaskId, text: &str) -> LifecycleResult<()> {
        self.require(id)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCommentText.into());
        }
        self.gateway.add_comment(id, trimmed).await?;
        self.reload_tasks().await
    }

    /// Replaces a task's label set wholesale.
    ///
    /// Names not yet in the shared namespace are created there before
    /// the task references them.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id or
    /// [`LifecycleError::Sync`] when the remote call fails.
    pub async fn set_labels(&self, id: TaskId, labels: Vec<Label>) -> LifecycleResult<Task> {
        self.require(id)?;
        let patch = TaskPatch::new().with_labels(labels);
        let updated = self.gateway.update(id, patch).await?;
        self.store.merge_labels(updated.labels());
        self.store.upsert(updated.clone());
        Ok(updated)
    }

    /// Starts the work timer for a task.
    ///
    /// Returns `Ok(false)` when a timer is already running for it.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id or
    /// [`LifecycleError::Local`] when the snapshot cannot be persisted.
    pub fn start_timer(&self, id: TaskId) -> LifecycleResult<bool> {
        self.require(id)?;
        Ok(self.timers.start(id)?)
    }

    /// Stops the work timer and commits its delta to the task's total.
    ///
    /// Returns the committed delta in whole seconds; `Ok(0)` when no
    /// timer was running. The new total is persisted remotely before the
    /// local task is updated.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] for an unknown id,
    /// [`LifecycleError::Local`] when the snapshot cannot be persisted,
    /// or [`LifecycleError::Sync`] when the remote commit fails — the
    /// stopped interval is dropped in that case (an undercount, never a
    /// double count).
    pub async fn stop_timer(&self, id: TaskId) -> LifecycleResult<u64> {
        let mut task = self.require(id)?;
        let delta = self.timers.stop(id)?;
        if delta == 0 {
            return Ok(0);
        }
        let total = task.time_spent().saturating_add(delta);
        self.gateway.update_time_spent(id, total).await?;
        task.add_time(delta);
        self.store.upsert(task);
        Ok(delta)
    }

    async fn push_steps(&self, id: TaskId, edited: &Task) -> LifecycleResult<Task> {
        let patch = TaskPatch::new().with_steps(edited.steps().iter().cloned());
        let updated = self.gateway.update(id, patch).await?;
        self.store.upsert(updated.clone());
        Ok(updated)
    }

    async fn reload_tasks(&self) -> LifecycleResult<()> {
        let tasks = self.gateway.fetch_all().await?;
        self.store.replace_all(tasks);
        Ok(())
    }

    fn require(&self, id: TaskId) -> LifecycleResult<Task> {
        self.store.get(id).ok_or(LifecycleError::TaskNotFound(id))
    }
}
