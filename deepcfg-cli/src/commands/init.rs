//! Init command implementation.
//!
//! This module implements the `init` command, which scaffolds a configuration
//! directory from the schema's example values.

use crate::error::CliError;
use crate::utils::{open_store, GlobalOptions};
use clap::Parser;
use std::path::PathBuf;

/// Write a sample configuration directory.
#[derive(Parser)]
#[command(about = "Write a sample configuration directory")]
pub struct InitCommand {
    /// Directory to create (defaults to --config-dir)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Overwrite existing section files
    #[arg(long)]
    force: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let dir = self.dir.unwrap_or_else(|| global.config_dir.clone());
        let store = open_store(global);

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would write a sample configuration to: {}", dir.display());
            for section in store.schema().section_names() {
                let path = store.section_file(&dir, section);
                if path.exists() && !self.force {
                    println!(
                        "  - ERROR: File already exists (use --force to replace): {}",
                        path.display()
                    );
                } else {
                    println!("  - Write {}", path.display());
                }
            }
            return Ok(());
        }

        let written = store.write_template(&dir, self.force)?;
        for path in &written {
            println!("Created {}", path.display());
        }
        Ok(())
    }
}
