//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CheckCommand, CompletionsCommand, InitCommand, ShowCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "DEEPCFG_CONFIG_DIR";

/// Command-line tool for checking deep learning project configurations.
#[derive(Parser)]
#[command(name = "deepcfg")]
#[command(version, about = "Check and repair project configuration directories", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration directory holding one YAML file per section
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        env = CONFIG_DIR_ENV,
        default_value = "config"
    )]
    pub config_dir: PathBuf,

    /// File extension of section files
    #[arg(long, value_name = "EXT", global = true, default_value = "yaml")]
    pub extension: String,

    /// Give empty wildcard sections (losses, metrics) one example entry
    #[arg(long, global = true)]
    pub placeholders: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Load and validate a configuration directory
    Check(CheckCommand),

    /// Write a sample configuration directory
    Init(InitCommand),

    /// Print the validated configuration or one node of it
    Show(ShowCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
