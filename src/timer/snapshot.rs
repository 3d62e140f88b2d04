//! Persisted shape of the running-timer registry.

use crate::board::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable snapshot of all running timers.
///
/// Maps each timed task to its start instant. The snapshot is its own
/// local document, never part of a task's persisted fields: whether a
/// task *is being timed* stays ephemeral and crash-safe independent of
/// its committed total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    timers: BTreeMap<TaskId, DateTime<Utc>>,
}

impl RegistrySnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timers: BTreeMap::new(),
        }
    }

    /// Creates a snapshot from a timer map.
    #[must_use]
    pub const fn from_timers(timers: BTreeMap<TaskId, DateTime<Utc>>) -> Self {
        Self { timers }
    }

    /// Returns the timer map.
    #[must_use]
    pub const fn timers(&self) -> &BTreeMap<TaskId, DateTime<Utc>> {
        &self.timers
    }

    /// Consumes the snapshot into its timer map.
    #[must_use]
    pub fn into_timers(self) -> BTreeMap<TaskId, DateTime<Utc>> {
        self.timers
    }

    /// Returns the number of running timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` when no timer is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
