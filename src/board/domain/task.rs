//! Task aggregate root, status enum, and checklist steps.

use super::{BoardDomainError, Comment, Label, ParseStatusError, StatusTransition, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kanban column a task currently sits in.
///
/// The status machine is a labeling system, not a workflow gate: every
/// status is reachable from every other status and none is terminal,
/// because the board permits arbitrary drags between columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Work has not started.
    NotStarted,
    /// Work is underway.
    InProgress,
    /// Work is awaiting review.
    InReview,
    /// Work is blocked on something external.
    Blocked,
    /// Work is finished.
    Complete,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const COLUMN_ORDER: [Self; 5] = [
        Self::NotStarted,
        Self::InProgress,
        Self::InReview,
        Self::Blocked,
        Self::Complete,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "notstarted",
            Self::InProgress => "inprogress",
            Self::InReview => "inreview",
            Self::Blocked => "blocked",
            Self::Complete => "complete",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "notstarted" | "not_started" => Ok(Self::NotStarted),
            "inprogress" | "in_progress" => Ok(Self::InProgress),
            "inreview" | "in_review" => Ok(Self::InReview),
            "blocked" => Ok(Self::Blocked),
            "complete" => Ok(Self::Complete),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checklist step of a task.
///
/// Steps are addressed by their position in the task's step sequence.
/// The position is re-derived from the stored sequence on every edit, so
/// it is only stable under a single writer per task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    text: String,
    completed: bool,
}

impl Step {
    /// Creates an unchecked step.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStepText`] when the text is empty
    /// after trimming.
    pub fn new(text: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            text: validated_step_text(text)?,
            completed: false,
        })
    }

    /// Returns the step text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` when the step is checked off.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion flag and returns the new value.
    pub const fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Replaces the step text.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStepText`] when the text is empty
    /// after trimming.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), BoardDomainError> {
        self.text = validated_step_text(text)?;
        Ok(())
    }
}

fn validated_step_text(text: impl Into<String>) -> Result<String, BoardDomainError> {
    let raw = text.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyStepText);
    }
    Ok(trimmed.to_owned())
}

/// Task aggregate root.
///
/// Authoritative task state as last confirmed by the remote store. The
/// committed `time_spent` total excludes any currently running timer; the
/// timer registry and reconciler own that concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    details: Option<String>,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    steps: Vec<Step>,
    comments: Vec<Comment>,
    labels: Vec<Label>,
    created_at: DateTime<Utc>,
    archived: bool,
    archived_at: Option<DateTime<Utc>>,
    time_spent: u64,
}

impl Task {
    /// Creates a fresh, unarchived task in the not-started column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyDescription`] when the description
    /// is empty after trimming.
    pub fn new(
        id: TaskId,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id,
            description: validated_description(description)?,
            details: None,
            status: TaskStatus::NotStarted,
            due_date: None,
            steps: Vec::new(),
            comments: Vec::new(),
            labels: Vec::new(),
            created_at,
            archived: false,
            archived_at: None,
            time_spent: 0,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the free-text details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the checklist steps in stored order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the comments in append order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the attached labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the server-assigned creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when the task is archived.
    #[must_use]
    pub const fn archived(&self) -> bool {
        self.archived
    }

    /// Returns the archival timestamp; set exactly when archived.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns the committed work total in whole seconds.
    #[must_use]
    pub const fn time_spent(&self) -> u64 {
        self.time_spent
    }

    /// Returns `(completed, total)` step counts for progress display.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let done = self.steps.iter().filter(|step| step.completed()).count();
        (done, self.steps.len())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyDescription`] when the text is
    /// empty after trimming.
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), BoardDomainError> {
        self.description = validated_description(description)?;
        Ok(())
    }

    /// Replaces the free-text details.
    pub fn set_details(&mut self, details: Option<String>) {
        self.details = details;
    }

    /// Replaces the due date.
    pub const fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    /// Moves the task to another column.
    ///
    /// Returns `None` when the status is unchanged; no transition event is
    /// produced in that case.
    pub fn set_status(&mut self, status: TaskStatus) -> Option<StatusTransition> {
        if self.status == status {
            return None;
        }
        let from = self.status;
        self.status = status;
        Some(StatusTransition {
            task_id: self.id,
            from,
            to: status,
        })
    }

    /// Marks the task archived at the given instant.
    ///
    /// Archived tasks are excluded from every column grouping regardless
    /// of status. A running timer is deliberately left untouched.
    pub const fn archive(&mut self, at: DateTime<Utc>) {
        self.archived = true;
        self.archived_at = Some(at);
    }

    /// Clears the archived flag; the task reappears in its status column.
    pub const fn unarchive(&mut self) {
        self.archived = false;
        self.archived_at = None;
    }

    /// Appends a checklist step.
    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Replaces the whole step sequence.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.steps = steps;
    }

    /// Flips completion of the step at `index`, leaving all other steps
    /// and their order untouched. Returns the new completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::StepIndexOutOfRange`] when `index` does
    /// not address a stored step; stored state is unchanged.
    pub fn toggle_step(&mut self, index: usize) -> Result<bool, BoardDomainError> {
        let len = self.steps.len();
        let step = self
            .steps
            .get_mut(index)
            .ok_or(BoardDomainError::StepIndexOutOfRange { index, len })?;
        Ok(step.toggle())
    }

    /// Rewrites the text of the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::StepIndexOutOfRange`] when `index` does
    /// not address a stored step, or [`BoardDomainError::EmptyStepText`]
    /// when the replacement text is empty; stored state is unchanged in
    /// both cases.
    pub fn update_step_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), BoardDomainError> {
        let len = self.steps.len();
        let step = self
            .steps
            .get_mut(index)
            .ok_or(BoardDomainError::StepIndexOutOfRange { index, len })?;
        step.set_text(text)
    }

    /// Removes and returns the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::StepIndexOutOfRange`] when `index` does
    /// not address a stored step; stored state is unchanged.
    pub fn remove_step(&mut self, index: usize) -> Result<Step, BoardDomainError> {
        let len = self.steps.len();
        if index >= len {
            return Err(BoardDomainError::StepIndexOutOfRange { index, len });
        }
        Ok(self.steps.remove(index))
    }

    /// Appends a comment.
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Replaces the label set wholesale, deduplicating by name while
    /// keeping first-occurrence order.
    pub fn set_labels(&mut self, labels: Vec<Label>) {
        let mut seen = BTreeSet::new();
        self.labels = labels
            .into_iter()
            .filter(|label| seen.insert(label.name().to_owned()))
            .collect();
    }

    /// Adds a committed timer delta to the work total.
    ///
    /// The total only ever increases; deltas are already truncated to
    /// whole seconds at the point of commit.
    pub const fn add_time(&mut self, delta_seconds: u64) {
        self.time_spent = self.time_spent.saturating_add(delta_seconds);
    }

    /// Overwrites the committed work total from a remote record.
    pub const fn set_time_spent(&mut self, seconds: u64) {
        self.time_spent = seconds;
    }
}

fn validated_description(description: impl Into<String>) -> Result<String, BoardDomainError> {
    let raw = description.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyDescription);
    }
    Ok(trimmed.to_owned())
}
