//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `check`: Load and validate a configuration directory
//! - `init`: Write a sample configuration directory
//! - `show`: Print the validated configuration or one node of it
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod init;
pub mod show;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use show::ShowCommand;
