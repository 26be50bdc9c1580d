//! Output formatting for configuration trees.
//!
//! This module renders a configuration, or any node of one, as YAML, JSON or
//! a flat `path: value` listing for humans.

mod formatters;

use crate::namespace::Node;
use crate::{Result, Value};

pub use formatters::{FlatFormatter, JsonFormatter, YamlFormatter};

/// Trait for formatting configuration values into different output formats.
pub trait OutputFormatter {
    /// Format the given value into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, value: &Value) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// YAML, the on-disk format.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// One `path: value` line per leaf.
    Flat,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Yaml => Box::new(YamlFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Flat => Box::new(FlatFormatter),
        }
    }
}

/// Renders a node of a configuration tree.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Examples
///
/// ```
/// use deepcfg::output::{render, OutputFormat};
/// use deepcfg::Namespace;
///
/// let config = Namespace::from_yaml_str("training:\n  num_epochs: 10\n").unwrap();
/// let node = config.get(&["training"]).unwrap();
/// assert_eq!(render(node, OutputFormat::Flat).unwrap(), "num_epochs: 10");
/// ```
pub fn render(node: Node<'_>, format: OutputFormat) -> Result<String> {
    format.create_formatter().format(&node.to_value())
}
