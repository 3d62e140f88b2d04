//! Application services for board orchestration.

mod lifecycle;

pub use lifecycle::{LifecycleController, LifecycleError, LifecycleResult};
