//! Command line interface for lexindex.

pub mod args;
pub mod commands;
pub mod output;

// Re-export commonly used types
pub use args::{Command, LexIndexArgs, OutputFormat};
pub use commands::execute_command;
