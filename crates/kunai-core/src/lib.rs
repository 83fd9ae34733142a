//! Shared building blocks for the kunai vCard workspace.
//!
//! Holds the pieces every other crate leans on: runtime configuration,
//! the core error type, product constants, and small shared enums.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
