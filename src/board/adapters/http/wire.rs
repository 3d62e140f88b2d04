//! Request bodies for the remote task store's JSON contract.

use crate::board::domain::{Label, Step, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Body of `POST /api/tasks`.
///
/// Initial steps travel as bare texts; the server creates them
/// unchecked.
#[derive(Debug, Serialize)]
pub struct CreateTaskBody<'a> {
    /// Task description.
    pub description: &'a str,
    /// Free-text details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a str>,
    /// Initial checklist step texts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<&'a [String]>,
    /// Due date as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Initial labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<&'a [Label]>,
}

/// Body of `PUT /api/tasks/:id`; absent fields stay untouched.
#[derive(Debug, Serialize)]
pub struct UpdateTaskBody<'a> {
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    /// Replacement details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a str>,
    /// Replacement due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<&'a [Label]>,
    /// Replacement step sequence, full objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<&'a [Step]>,
}

/// Body of `PUT /api/tasks/:id/status`.
#[derive(Debug, Serialize)]
pub struct UpdateStatusBody {
    /// Target status column.
    pub status: TaskStatus,
}

/// Body of `PUT /api/tasks/:id/archive`.
#[derive(Debug, Serialize)]
pub struct UpdateArchivedBody {
    /// New archived flag.
    pub archived: bool,
}

/// Body of `PUT /api/tasks/:id/time`.
#[derive(Debug, Serialize)]
pub struct UpdateTimeBody {
    /// New committed total in whole seconds.
    pub time_spent: u64,
}

/// Body of `POST /api/tasks/:id/comments`.
#[derive(Debug, Serialize)]
pub struct AddCommentBody<'a> {
    /// Comment text.
    pub text: &'a str,
}

/// Body of `POST /api/tasks/:id/toggle-step`.
#[derive(Debug, Serialize)]
pub struct ToggleStepBody {
    /// Position of the step to flip.
    pub step_index: usize,
}
