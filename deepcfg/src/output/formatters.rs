//! Output formatter implementations.

use crate::namespace::{join_path, Value};
use crate::Result;

use super::OutputFormatter;

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        let yaml = serde_yaml::to_string(value)?;
        Ok(yaml.trim_end().to_string())
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Formatter for human-readable output.
///
/// Mappings are flattened to one `path: value` line per leaf, in key order.
/// Lists are shown inline. An empty mapping is shown as `{}`.
pub struct FlatFormatter;

impl FlatFormatter {
    fn collect(value: &Value, path: &mut Vec<String>, lines: &mut Vec<String>) {
        match value {
            Value::Map(space) if !space.is_empty() => {
                for (key, child) in space.items() {
                    path.push(key.to_string());
                    Self::collect(child, path, lines);
                    path.pop();
                }
            }
            leaf if path.is_empty() => lines.push(leaf.to_string()),
            leaf => lines.push(format!("{}: {leaf}", join_path(path))),
        }
    }
}

impl OutputFormatter for FlatFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        let mut lines = Vec::new();
        Self::collect(value, &mut Vec::new(), &mut lines);
        Ok(lines.join("\n"))
    }
}
