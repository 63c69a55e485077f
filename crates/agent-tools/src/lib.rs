//! Tool management and execution framework for agent-rs
//!
//! Tools are the capabilities a role is granted. A `ToolRegistry` holds the
//! tools one agent may call; agents without a registry cannot reach any
//! data source.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;

#[cfg(test)]
pub use tool::MockTool;
