//! Command to print the validated configuration.

use crate::error::CliError;
use crate::utils::{load_store, GlobalOptions};
use clap::Args;
use deepcfg::namespace::split_path;
use deepcfg::output::render;
use deepcfg::OutputFormat;

/// Print the validated configuration or one node of it.
#[derive(Args)]
pub struct ShowCommand {
    /// Path of the node to print, e.g. `training/scheduler` or `training.scheduler`.
    /// Use `/` when a key itself contains a dot
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (store, _report) = load_store(global)?;

        let path = self.path.as_deref().map(split_path).unwrap_or_default();
        let node = store.get(path.as_slice())?;
        println!("{}", render(node, self.format)?);
        Ok(())
    }
}
