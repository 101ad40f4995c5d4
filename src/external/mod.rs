//! External tool execution

pub mod runner;

pub use runner::{ToolOutcome, is_available, run_tool};
