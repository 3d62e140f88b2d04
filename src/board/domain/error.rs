//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
///
/// All variants belong to the validation class: they are raised locally,
/// before any network call, and never correspond to partially applied
/// state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The checklist step text is empty after trimming.
    #[error("step text must not be empty")]
    EmptyStepText,

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyCommentText,

    /// The label name is empty after trimming.
    #[error("label name must not be empty")]
    EmptyLabelName,

    /// A step index does not address an existing step.
    #[error("step index {index} out of range for {len} steps")]
    StepIndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of steps currently stored.
        len: usize,
    },
}

/// Error returned while parsing task statuses from wire or storage values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing label colors from wire or storage values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown label color: {0}")]
pub struct ParseLabelColorError(pub String);
