//! Shared world state for board lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::FakeClock;
use rstest::fixture;
use taskdeck::board::adapters::memory::InMemorySyncGateway;
use taskdeck::board::domain::{StatusTransition, Task, TaskId};
use taskdeck::board::services::LifecycleController;
use taskdeck::board::store::TaskStore;
use taskdeck::local::InMemoryDocumentStore;
use taskdeck::timer::{RegistrySnapshot, TimeReconciler, TimerRegistry};
use tokio::sync::broadcast;

/// Gateway type used by the BDD world.
pub type WorldGateway = InMemorySyncGateway<FakeClock>;

/// Controller type used by the BDD world.
pub type WorldController =
    LifecycleController<WorldGateway, FakeClock, InMemoryDocumentStore<RegistrySnapshot>>;

/// Reconciler type used by the BDD world.
pub type WorldReconciler = TimeReconciler<FakeClock, InMemoryDocumentStore<RegistrySnapshot>>;

/// Scenario world for board lifecycle behaviour tests.
pub struct BoardWorld {
    pub clock: FakeClock,
    pub gateway: Arc<WorldGateway>,
    pub snapshot_store: InMemoryDocumentStore<RegistrySnapshot>,
    pub controller: WorldController,
    pub transitions: broadcast::Receiver<StatusTransition>,
    pub task_id: Option<TaskId>,
    pub last_delta: Option<u64>,
}

impl BoardWorld {
    /// Creates a world with an empty remote store and no running timers.
    #[must_use]
    pub fn new() -> Self {
        let clock = FakeClock::fixed();
        let gateway = Arc::new(InMemorySyncGateway::new(Arc::new(clock.clone())));
        let snapshot_store = InMemoryDocumentStore::new();
        let registry = TimerRegistry::load(
            Arc::new(clock.clone()),
            Arc::new(snapshot_store.clone()),
        )
        .expect("load from empty snapshot store");
        let controller =
            LifecycleController::new(TaskStore::new(), Arc::clone(&gateway), registry);
        let transitions = controller.subscribe_transitions();

        Self {
            clock,
            gateway,
            snapshot_store,
            controller,
            transitions,
            task_id: None,
            last_delta: None,
        }
    }

    /// Returns the scenario's current task from the local store.
    pub fn task(&self) -> Result<Task, eyre::Report> {
        let id = self
            .task_id
            .ok_or_else(|| eyre::eyre!("no task has been created in this scenario"))?;
        self.controller
            .store()
            .get(id)
            .ok_or_else(|| eyre::eyre!("task {id} is missing from the local store"))
    }

    /// Builds a reconciler over the current store and registry.
    #[must_use]
    pub fn reconciler(&self) -> WorldReconciler {
        TimeReconciler::new(self.controller.store().clone(), self.controller.timers().clone())
    }

    /// Simulates a full page reload: a fresh engine over the same remote
    /// store and the same durable timer snapshot.
    pub fn reload(&mut self) -> Result<(), eyre::Report> {
        let registry = TimerRegistry::load(
            Arc::new(self.clock.clone()),
            Arc::new(self.snapshot_store.clone()),
        )
        .map_err(|err| eyre::eyre!("reload timer registry: {err}"))?;
        let controller = LifecycleController::new(
            TaskStore::new(),
            Arc::clone(&self.gateway),
            registry,
        );
        self.transitions = controller.subscribe_transitions();
        run_async(controller.refresh()).map_err(|err| eyre::eyre!("refresh after reload: {err}"))?;
        self.controller = controller;
        Ok(())
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
