//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command and the
//! helpers that turn them into a configured [`ConfigStore`].

use crate::error::CliError;
use deepcfg::{init_logger, schema, ConfigStore, LoadReport, StoreOptions, WildcardPolicy};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Configuration directory.
    pub config_dir: PathBuf,

    /// File extension of section files.
    pub extension: String,

    /// Create placeholder entries in empty wildcard sections.
    pub placeholders: bool,
}

impl GlobalOptions {
    /// Store options derived from the command line.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            extension: self.extension.trim_start_matches('.').to_string(),
            wildcard_policy: if self.placeholders {
                WildcardPolicy::Placeholder
            } else {
                WildcardPolicy::ExistingOnly
            },
        }
    }
}

/// Create a store for the built-in schema that reports through the logger.
pub fn open_store(global: &GlobalOptions) -> ConfigStore {
    ConfigStore::new(schema::builtin())
        .with_options(global.store_options())
        .with_notifier(init_logger(global.verbose, global.quiet))
}

/// Create a store and load the configuration directory into it.
///
/// # Errors
///
/// Returns the load failure; the store has already reported every failed
/// section through the logger.
pub fn load_store(global: &GlobalOptions) -> Result<(ConfigStore, LoadReport), CliError> {
    let mut store = open_store(global);
    let report = store.load(&global.config_dir)?;
    Ok((store, report))
}
