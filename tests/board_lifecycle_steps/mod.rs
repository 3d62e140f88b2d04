//! Step definitions for board lifecycle behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
