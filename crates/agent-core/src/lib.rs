//! Core abstractions for agent-rs
//!
//! Defines the `Agent` trait every pipeline stage runs behind, the per-run
//! `Context` store, and the shared error type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
