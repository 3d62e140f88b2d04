//! Work-timer registry, reconciliation, and periodic refresh.
//!
//! Time tracking splits across two stores joined by a pure function: the
//! task record carries the durable committed total, and the registry's
//! snapshot document carries the start instants of running timers. A
//! reload therefore resumes a running timer with its original start
//! instant and the displayed time stays continuous instead of resetting
//! to zero. The join ([`TimeReconciler`]) never writes; commits flow one
//! way, from [`TimerRegistry::stop`] through the caller into the task's
//! committed total.

mod reconcile;
mod registry;
mod snapshot;
mod ticker;

pub use reconcile::TimeReconciler;
pub use registry::TimerRegistry;
pub use snapshot::RegistrySnapshot;
pub use ticker::Ticker;

#[cfg(test)]
mod tests;
