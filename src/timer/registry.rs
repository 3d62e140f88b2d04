//! Registry of running work timers.

use crate::board::domain::TaskId;
use crate::local::{DocumentStore, LocalStoreResult};
use crate::timer::RegistrySnapshot;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Tracks which tasks currently have a running timer and since when.
///
/// The registry owns timer state exclusively; a task's committed total
/// lives on the task record and is only ever increased by the caller
/// committing a [`TimerRegistry::stop`] delta. Every state change is
/// persisted to the snapshot document *before* it takes effect in
/// memory, so a reload resumes running timers with their original start
/// instants and a failed write leaves the registry unchanged.
///
/// Several tabs or processes sharing one snapshot document race on it
/// with last-write-wins semantics: both can observe "no timer running"
/// and both can start one. That race is a known, accepted limitation of
/// the storage contract; callers wanting stronger guarantees need a
/// coordination layer above this one.
#[derive(Debug)]
pub struct TimerRegistry<C, S>
where
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    clock: Arc<C>,
    store: Arc<S>,
    state: Arc<RwLock<BTreeMap<TaskId, DateTime<Utc>>>>,
}

impl<C, S> Clone for TimerRegistry<C, S>
where
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            store: Arc::clone(&self.store),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C, S> TimerRegistry<C, S>
where
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    /// Restores the registry from its snapshot document.
    ///
    /// A missing document yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::local::LocalStoreError`] when the snapshot store
    /// cannot be read.
    pub fn load(clock: Arc<C>, store: Arc<S>) -> LocalStoreResult<Self> {
        let snapshot = store.load()?.unwrap_or_default();
        Ok(Self {
            clock,
            store,
            state: Arc::new(RwLock::new(snapshot.into_timers())),
        })
    }

    /// Starts a timer for the task.
    ///
    /// Returns `Ok(false)` without side effects when a timer is already
    /// running for the task. On success the updated snapshot has been
    /// persisted before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::local::LocalStoreError`] when the snapshot cannot
    /// be persisted; the in-memory registry is left unchanged.
    pub fn start(&self, id: TaskId) -> LocalStoreResult<bool> {
        let started_at = self.clock.utc();
        let mut timers = self.read().clone();
        if timers.contains_key(&id) {
            return Ok(false);
        }
        timers.insert(id, started_at);
        self.store.save(&RegistrySnapshot::from_timers(timers.clone()))?;
        *self.write() = timers;
        tracing::debug!(task_id = %id, "timer started");
        Ok(true)
    }

    /// Stops the task's timer and returns the elapsed whole seconds.
    ///
    /// Returns `Ok(0)` without side effects when no timer is running for
    /// the task. The delta is truncated (never rounded) to whole seconds,
    /// so repeated start/stop cycles can only undercount, by less than a
    /// second per cycle. Stopping never mutates task state: the caller
    /// adds the delta to the committed total and persists that sum.
    ///
    /// # Errors
    ///
    /// Returns [`crate::local::LocalStoreError`] when the snapshot cannot
    /// be persisted; the timer keeps running in that case.
    pub fn stop(&self, id: TaskId) -> LocalStoreResult<u64> {
        let now = self.clock.utc();
        let mut timers = self.read().clone();
        let Some(started_at) = timers.remove(&id) else {
            return Ok(0);
        };
        self.store.save(&RegistrySnapshot::from_timers(timers.clone()))?;
        *self.write() = timers;
        let delta = whole_seconds_between(started_at, now);
        tracing::debug!(task_id = %id, delta_seconds = delta, "timer stopped");
        Ok(delta)
    }

    /// Removes the task's timer without producing a delta.
    ///
    /// Used when a task is deleted: the elapsed interval is discarded,
    /// not committed, and no registry entry may dangle for the dead id.
    /// Returns `true` when a timer was removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::local::LocalStoreError`] when the snapshot cannot
    /// be persisted; the timer keeps running in that case.
    pub fn discard(&self, id: TaskId) -> LocalStoreResult<bool> {
        let mut timers = self.read().clone();
        if timers.remove(&id).is_none() {
            return Ok(false);
        }
        self.store.save(&RegistrySnapshot::from_timers(timers.clone()))?;
        *self.write() = timers;
        tracing::debug!(task_id = %id, "timer discarded");
        Ok(true)
    }

    /// Returns `true` when a timer is running for the task.
    #[must_use]
    pub fn is_running(&self, id: TaskId) -> bool {
        self.read().contains_key(&id)
    }

    /// Returns the start instant of the task's running timer, if any.
    #[must_use]
    pub fn started_at(&self, id: TaskId) -> Option<DateTime<Utc>> {
        self.read().get(&id).copied()
    }

    /// Returns the ids of all tasks with a running timer.
    #[must_use]
    pub fn running(&self) -> Vec<TaskId> {
        self.read().keys().copied().collect()
    }

    /// Returns the live, uncommitted whole seconds of the task's running
    /// timer, `None` when no timer runs.
    ///
    /// Pure read; safe at arbitrary call frequency.
    #[must_use]
    pub fn live_delta(&self, id: TaskId) -> Option<u64> {
        let now = self.clock.utc();
        self.read()
            .get(&id)
            .map(|started_at| whole_seconds_between(*started_at, now))
    }

    /// Returns a snapshot of the current registry state.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::from_timers(self.read().clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<TaskId, DateTime<Utc>>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<TaskId, DateTime<Utc>>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whole seconds between two instants, truncated, clamped at zero.
fn whole_seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    u64::try_from(end.signed_duration_since(start).num_seconds().max(0)).unwrap_or(0)
}
