//! Command to load and validate a configuration directory.

use crate::error::CliError;
use crate::utils::{load_store, GlobalOptions};
use clap::Args;

/// Load and validate a configuration directory.
#[derive(Args)]
pub struct CheckCommand {
    /// Write the corrected configuration back to the directory
    #[arg(long)]
    pub write: bool,
}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (store, report) = load_store(global)?;

        if self.write && !report.corrections.is_empty() {
            let written = store.save(&global.config_dir)?;
            if !global.quiet {
                eprintln!(
                    "Wrote {} section file(s) to {}",
                    written.len(),
                    global.config_dir.display()
                );
            }
        }

        println!(
            "Configuration is valid: {} section(s), {} correction(s), {} warning(s)",
            report.sections.len(),
            report.corrections.len(),
            report.warnings()
        );
        Ok(())
    }
}
