//! Durable local state storage.
//!
//! State that must survive reloads but never travels to the remote task
//! store lives in per-concern JSON documents behind the
//! [`DocumentStore`] port: the running-timer registry snapshot and the
//! user preferences. Documents are independent of each other and of the
//! remote store by design, and carry no cross-process coordination
//! (last writer wins).

pub mod adapters;
pub mod ports;

pub use adapters::{InMemoryDocumentStore, JsonFileStore};
pub use ports::{DocumentStore, LocalStoreError, LocalStoreResult};
