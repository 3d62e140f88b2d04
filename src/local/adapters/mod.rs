//! Adapter implementations of the local document store port.

pub mod fs;
pub mod memory;

pub use fs::JsonFileStore;
pub use memory::InMemoryDocumentStore;
