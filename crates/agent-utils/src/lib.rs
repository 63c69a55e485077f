//! Shared utilities for agent-rs
//!
//! Tracing setup and environment/configuration helpers used by every
//! binary in the workspace.

pub mod config;
pub mod logging;

pub use config::{Config, load_env};
pub use logging::{init_json_tracing_with, init_tracing, init_tracing_with};
