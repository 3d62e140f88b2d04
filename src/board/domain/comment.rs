//! Append-only task comments.

use super::BoardDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-text comment attached to a task.
///
/// Comments are append-only: no edit or delete operation exists. The
/// creation timestamp is assigned by the remote store; clients never
/// fabricate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment with a server-assigned timestamp.
    ///
    /// The text may embed bare URLs; rendering them is a presentation
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCommentText`] when the text is
    /// empty after trimming.
    pub fn new(
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BoardDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCommentText);
        }
        Ok(Self {
            text: trimmed.to_owned(),
            created_at,
        })
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the server-assigned creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
