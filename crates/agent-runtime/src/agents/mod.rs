//! Concrete agent implementations
//!
//! - SimpleAgent: one completion, no tools
//! - ToolAgent: LLM loop with tool execution

pub mod simple;
pub mod tool;

pub use simple::{SimpleAgent, SimpleConfig};
pub use tool::ToolAgent;
