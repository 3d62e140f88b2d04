//! HTTP implementation of the sync gateway.

use super::wire::{
    AddCommentBody, CreateTaskBody, ToggleStepBody, UpdateArchivedBody, UpdateStatusBody,
    UpdateTaskBody, UpdateTimeBody,
};
use crate::board::domain::{Label, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::board::ports::{SyncGateway, SyncGatewayError, SyncResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

/// Sync gateway speaking the remote store's JSON-over-HTTP contract.
///
/// The adapter maps responses one-to-one: non-2xx statuses become
/// [`SyncGatewayError::RemoteStatus`] (404 on a task route becomes
/// [`SyncGatewayError::TaskNotFound`]), connection-level failures become
/// [`SyncGatewayError::Transport`]. Retry policy belongs to whatever sits
/// above or below this adapter, never inside it.
#[derive(Debug, Clone)]
pub struct HttpSyncGateway {
    client: Client,
    base_url: String,
}

impl HttpSyncGateway {
    /// Creates a gateway for the given base URL, e.g.
    /// `http://localhost:3000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a gateway reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client,
            base_url: base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn task_url(&self, id: TaskId, suffix: &str) -> String {
        format!("{}/api/tasks/{id}{suffix}", self.base_url)
    }
}

fn check(id: Option<TaskId>, response: Response) -> SyncResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(id.map_or_else(
            || SyncGatewayError::RemoteStatus {
                status: status.as_u16(),
            },
            SyncGatewayError::TaskNotFound,
        ));
    }
    Err(SyncGatewayError::RemoteStatus {
        status: status.as_u16(),
    })
}

async fn read_json<T>(response: Response) -> SyncResult<T>
where
    T: serde::de::DeserializeOwned,
{
    response.json().await.map_err(SyncGatewayError::transport)
}

#[async_trait]
impl SyncGateway for HttpSyncGateway {
    async fn fetch_all(&self) -> SyncResult<Vec<Task>> {
        let response = self
            .client
            .get(self.url("/api/tasks"))
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        read_json(check(None, response)?).await
    }

    async fn fetch_labels(&self) -> SyncResult<Vec<Label>> {
        let response = self
            .client
            .get(self.url("/api/labels"))
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        read_json(check(None, response)?).await
    }

    async fn create(&self, draft: TaskDraft) -> SyncResult<Task> {
        let body = CreateTaskBody {
            description: draft.description(),
            details: draft.details(),
            steps: (!draft.steps().is_empty()).then_some(draft.steps()),
            due_date: draft.due_date(),
            labels: (!draft.labels().is_empty()).then_some(draft.labels()),
        };
        let response = self
            .client
            .post(self.url("/api/tasks"))
            .json(&body)
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        let task: Task = read_json(check(None, response)?).await?;
        tracing::debug!(task_id = %task.id(), "task created remotely");
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> SyncResult<Task> {
        let body = UpdateTaskBody {
            description: patch.description(),
            details: patch.details(),
            due_date: patch.due_date(),
            labels: patch.labels(),
            steps: patch.steps(),
        };
        let response = self
            .client
            .put(self.task_url(id, ""))
            .json(&body)
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        read_json(check(Some(id), response)?).await
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> SyncResult<()> {
        let response = self
            .client
            .put(self.task_url(id, "/status"))
            .json(&UpdateStatusBody { status })
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        check(Some(id), response).map(|_response| ())
    }

    async fn update_archived(&self, id: TaskId, archived: bool) -> SyncResult<()> {
        let response = self
            .client
            .put(self.task_url(id, "/archive"))
            .json(&UpdateArchivedBody { archived })
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        check(Some(id), response).map(|_response| ())
    }

    async fn update_time_spent(&self, id: TaskId, seconds: u64) -> SyncResult<()> {
        let response = self
            .client
            .put(self.task_url(id, "/time"))
            .json(&UpdateTimeBody {
                time_spent: seconds,
            })
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        check(Some(id), response).map(|_response| ())
    }

    async fn add_comment(&self, id: TaskId, text: &str) -> SyncResult<()> {
        let response = self
            .client
            .post(self.task_url(id, "/comments"))
            .json(&AddCommentBody { text })
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        check(Some(id), response).map(|_response| ())
    }

    async fn toggle_step(&self, id: TaskId, step_index: usize) -> SyncResult<()> {
        let response = self
            .client
            .post(self.task_url(id, "/toggle-step"))
            .json(&ToggleStepBody { step_index })
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        check(Some(id), response).map(|_response| ())
    }

    async fn delete(&self, id: TaskId) -> SyncResult<()> {
        let response = self
            .client
            .delete(self.task_url(id, ""))
            .send()
            .await
            .map_err(SyncGatewayError::transport)?;
        check(Some(id), response)?;
        tracing::debug!(task_id = %id, "task deleted remotely");
        Ok(())
    }
}
