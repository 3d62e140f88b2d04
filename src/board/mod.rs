//! Kanban board: task state, lifecycle, and remote synchronization.
//!
//! The board keeps authoritative task state in [`store::TaskStore`],
//! pushes every mutation through the remote contract first
//! ([`ports::SyncGateway`]), and broadcasts change and transition events
//! for presentation to consume. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod store;

#[cfg(test)]
mod tests;
