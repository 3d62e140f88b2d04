//! In-memory sync gateway for board service tests.

use crate::board::domain::{Comment, Label, Step, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::board::ports::{SyncGateway, SyncGatewayError, SyncResult};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BAD_REQUEST: u16 = 400;

/// Sync gateway backed by process memory instead of a remote store.
///
/// Mirrors the remote contract faithfully: ids are assigned from one
/// upwards, unknown label names enter the shared namespace on first use
/// (an existing name keeps its original color), comment and archival
/// timestamps come from the injected clock, and a toggle outside the
/// step range is rejected without effect.
#[derive(Debug)]
pub struct InMemorySyncGateway<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    state: Arc<RwLock<RemoteState>>,
}

#[derive(Debug, Default)]
struct RemoteState {
    tasks: BTreeMap<TaskId, Task>,
    labels: Vec<Label>,
    next_id: u64,
}

impl<C> Clone for InMemorySyncGateway<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C> InMemorySyncGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty gateway using the given clock for server-side
    /// timestamps.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            state: Arc::new(RwLock::new(RemoteState {
                tasks: BTreeMap::new(),
                labels: Vec::new(),
                next_id: 1,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RemoteState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RemoteState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    const fn bad_request() -> SyncGatewayError {
        SyncGatewayError::RemoteStatus {
            status: BAD_REQUEST,
        }
    }
}

fn get_or_add_label(state: &mut RemoteState, label: &Label) -> Label {
    let existing = state
        .labels
        .iter()
        .find(|known| known.name() == label.name())
        .cloned();
    existing.map_or_else(
        || {
            state.labels.push(label.clone());
            label.clone()
        },
        |found| found,
    )
}

#[async_trait]
impl<C> SyncGateway for InMemorySyncGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn fetch_all(&self) -> SyncResult<Vec<Task>> {
        Ok(self.read().tasks.values().cloned().collect())
    }

    async fn fetch_labels(&self) -> SyncResult<Vec<Label>> {
        Ok(self.read().labels.clone())
    }

    async fn create(&self, draft: TaskDraft) -> SyncResult<Task> {
        let created_at = self.clock.utc();
        let mut state = self.write();

        let id = TaskId::new(state.next_id);
        let mut task =
            Task::new(id, draft.description(), created_at).map_err(|_domain| Self::bad_request())?;
        if let Some(details) = draft.details() {
            task.set_details(Some(details.to_owned()));
        }
        task.set_due_date(draft.due_date());
        let mut steps = Vec::with_capacity(draft.steps().len());
        for text in draft.steps() {
            steps.push(Step::new(text.clone()).map_err(|_domain| Self::bad_request())?);
        }
        task.set_steps(steps);
        let labels = draft
            .labels()
            .iter()
            .map(|label| get_or_add_label(&mut state, label))
            .collect();
        task.set_labels(labels);

        state.next_id = state.next_id.saturating_add(1);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> SyncResult<Task> {
        let mut state = self.write();
        let resolved_labels = patch.labels().map(|labels| {
            labels
                .iter()
                .map(|label| get_or_add_label(&mut state, label))
                .collect::<Vec<Label>>()
        });

        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(SyncGatewayError::TaskNotFound(id))?;
        if let Some(description) = patch.description() {
            task.set_description(description)
                .map_err(|_domain| Self::bad_request())?;
        }
        if let Some(details) = patch.details() {
            task.set_details(Some(details.to_owned()));
        }
        if let Some(due_date) = patch.due_date() {
            task.set_due_date(Some(due_date));
        }
        if let Some(labels) = resolved_labels {
            task.set_labels(labels);
        }
        if let Some(steps) = patch.steps() {
            task.set_steps(steps.to_vec());
        }
        Ok(task.clone())
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> SyncResult<()> {
        let mut state = self.write();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(SyncGatewayError::TaskNotFound(id))?;
        task.set_status(status);
        Ok(())
    }

    async fn update_archived(&self, id: TaskId, archived: bool) -> SyncResult<()> {
        let archived_at = self.clock.utc();
        let mut state = self.write();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(SyncGatewayError::TaskNotFound(id))?;
        if archived {
            task.archive(archived_at);
        } else {
            task.unarchive();
        }
        Ok(())
    }

    async fn update_time_spent(&self, id: TaskId, seconds: u64) -> SyncResult<()> {
        let mut state = self.write();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(SyncGatewayError::TaskNotFound(id))?;
        task.set_time_spent(seconds);
        Ok(())
    }

    async fn add_comment(&self, id: TaskId, text: &str) -> SyncResult<()> {
        let created_at = self.clock.utc();
        let mut state = self.write();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(SyncGatewayError::TaskNotFound(id))?;
        let comment = Comment::new(text, created_at).map_err(|_domain| Self::bad_request())?;
        task.push_comment(comment);
        Ok(())
    }

    async fn toggle_step(&self, id: TaskId, step_index: usize) -> SyncResult<()> {
        let mut state = self.write();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(SyncGatewayError::TaskNotFound(id))?;
        task.toggle_step(step_index)
            .map_err(|_domain| Self::bad_request())?;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> SyncResult<()> {
        let mut state = self.write();
        state
            .tasks
            .remove(&id)
            .map(|_removed| ())
            .ok_or(SyncGatewayError::TaskNotFound(id))
    }
}
