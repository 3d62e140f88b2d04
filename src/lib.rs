//! Taskdeck: personal kanban task lifecycle and time-tracking core.
//!
//! This crate provides the engine behind a kanban board: authoritative
//! task state with checklist steps, comments, and labels; the status
//! state machine with archive and delete semantics; and a reload-safe
//! work timer reconciled against a server-persisted cumulative total.
//! Rendering, drag visuals, and celebration effects are external
//! collaborators that call into this API and subscribe to its events.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, memory, files)
//!
//! # Modules
//!
//! - [`board`]: Task store, lifecycle controller, and remote sync
//! - [`timer`]: Running-timer registry, time reconciliation, and ticks
//! - [`local`]: Durable local state documents
//! - [`prefs`]: Persisted user preferences

pub mod board;
pub mod local;
pub mod prefs;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;
