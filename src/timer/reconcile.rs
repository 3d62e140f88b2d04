//! Read-side join of committed totals and live timer deltas.

use crate::board::domain::TaskId;
use crate::board::store::TaskStore;
use crate::local::DocumentStore;
use crate::timer::{RegistrySnapshot, TimerRegistry};
use mockable::Clock;

/// Computes displayed elapsed time for tasks.
///
/// The reconciler owns no data: it joins a task's committed total from
/// the task store with the live delta of any running timer from the
/// registry. All of its methods are side-effect free and safe to call at
/// display-refresh frequency.
#[derive(Debug, Clone)]
pub struct TimeReconciler<C, S>
where
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    store: TaskStore,
    registry: TimerRegistry<C, S>,
}

impl<C, S> TimeReconciler<C, S>
where
    C: Clock + Send + Sync,
    S: DocumentStore<RegistrySnapshot>,
{
    /// Creates a reconciler over the given store and registry.
    #[must_use]
    pub const fn new(store: TaskStore, registry: TimerRegistry<C, S>) -> Self {
        Self { store, registry }
    }

    /// Elapsed whole seconds for a task given its committed total.
    ///
    /// Equals `committed_seconds` exactly when no timer runs for the
    /// task; otherwise adds the running timer's live delta. Across any
    /// sequence of start/stop cycles the result is monotonically
    /// non-decreasing.
    #[must_use]
    pub fn elapsed(&self, id: TaskId, committed_seconds: u64) -> u64 {
        committed_seconds.saturating_add(self.registry.live_delta(id).unwrap_or(0))
    }

    /// Elapsed whole seconds for a stored task, `None` when the id is
    /// unknown to the task store.
    #[must_use]
    pub fn elapsed_for(&self, id: TaskId) -> Option<u64> {
        self.store
            .get(id)
            .map(|task| self.elapsed(id, task.time_spent()))
    }

    /// Current totals for every task with a running timer.
    ///
    /// This is the periodic display recompute: one pass over running
    /// timers only, so each tick costs time proportional to the number
    /// of running timers, not the number of tasks. A timer whose task is
    /// missing from the store contributes its live delta alone.
    #[must_use]
    pub fn running_totals(&self) -> Vec<(TaskId, u64)> {
        self.registry
            .running()
            .into_iter()
            .map(|id| {
                let committed = self.store.get(id).map_or(0, |task| task.time_spent());
                (id, self.elapsed(id, committed))
            })
            .collect()
    }
}
