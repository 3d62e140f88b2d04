//! Request payloads for creating and editing tasks.

use super::{Label, Step};
use chrono::NaiveDate;

/// Payload for creating a task.
///
/// The remote store assigns the id and creation timestamp; the status
/// always starts in the not-started column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    description: String,
    details: Option<String>,
    steps: Vec<String>,
    due_date: Option<NaiveDate>,
    labels: Vec<Label>,
}

impl TaskDraft {
    /// Creates a draft with the required description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            details: None,
            steps: Vec::new(),
            due_date: None,
            labels: Vec::new(),
        }
    }

    /// Sets free-text details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets initial checklist step texts.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = String>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Sets a due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets initial labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the initial step texts.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the initial labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

/// Partial-field edit of an existing task.
///
/// Absent fields are left untouched by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    description: Option<String>,
    details: Option<String>,
    due_date: Option<NaiveDate>,
    labels: Option<Vec<Label>>,
    steps: Option<Vec<Step>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            description: None,
            details: None,
            due_date: None,
            labels: None,
            steps: None,
        }
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the label set wholesale.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    /// Replaces the step sequence wholesale.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = Some(steps.into_iter().collect());
        self
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the replacement due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the replacement labels, if any.
    #[must_use]
    pub fn labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }

    /// Returns the replacement steps, if any.
    #[must_use]
    pub fn steps(&self) -> Option<&[Step]> {
        self.steps.as_deref()
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.details.is_none()
            && self.due_date.is_none()
            && self.labels.is_none()
            && self.steps.is_none()
    }
}
