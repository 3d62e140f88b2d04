//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

pub use gateway::{SyncGateway, SyncGatewayError, SyncResult};
