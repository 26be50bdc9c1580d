//! YAML parsing and persistence for namespaces.

use std::fs;
use std::path::Path;

use serde_yaml::Value as YamlValue;

use super::{join_path, Namespace, Value, PATH_DIVIDER};
use crate::error::{Error, Result};

/// Converts a parsed YAML node, tracking `path` for error messages.
///
/// Mapping keys are rendered as strings; keys that collide after rendering
/// are rejected rather than silently merged.
fn from_yaml(yaml: YamlValue, path: &mut Vec<String>) -> Result<Value> {
    let value = match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        YamlValue::String(s) => Value::Str(s),
        YamlValue::Sequence(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                path.push(index.to_string());
                let converted = from_yaml(item, path);
                path.pop();
                list.push(converted?);
            }
            Value::List(list)
        }
        YamlValue::Mapping(mapping) => {
            let mut space = Namespace::new();
            for (key, item) in mapping {
                let key = key_to_string(key);
                path.push(key.clone());
                if space.contains_key(&key) {
                    return Err(Error::DuplicateKey {
                        path: join_path(path),
                    });
                }
                let converted = from_yaml(item, path);
                path.pop();
                space.insert(key, converted?);
            }
            Value::Map(space)
        }
        // Tags carry no meaning for configuration values.
        YamlValue::Tagged(tagged) => from_yaml(tagged.value, path)?,
    };
    Ok(value)
}

fn key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl Namespace {
    /// Parses a YAML document into a namespace.
    ///
    /// An empty document yields an empty namespace. Key order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] for malformed YAML, [`Error::DuplicateKey`]
    /// if two keys of one mapping render to the same string (`1` and `'1'`),
    /// and [`Error::NotAMapping`] if the document is a scalar or a sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepcfg::Namespace;
    ///
    /// let space = Namespace::from_yaml_str("b: 1\na: 2\n").unwrap();
    /// assert_eq!(space.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    /// assert!(Namespace::from_yaml_str("").unwrap().is_empty());
    /// assert!(Namespace::from_yaml_str("- 1\n- 2\n").is_err());
    /// ```
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let yaml: YamlValue = serde_yaml::from_str(contents)?;
        match from_yaml(yaml, &mut Vec::new())? {
            Value::Map(space) => Ok(space),
            Value::Null => Ok(Self::new()),
            _ => Err(Error::NotAMapping {
                path: PATH_DIVIDER.to_string(),
            }),
        }
    }

    /// Renders the namespace as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a parse error as
    /// described in [`Namespace::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Writes the namespace to `path` as YAML.
    ///
    /// The document is written to a sibling temporary file first and renamed
    /// into place, so readers never observe a half-written file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_yaml_string()?;
        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = Path::new(&tmp_name);

        fs::write(tmp_path, contents)?;
        if let Err(e) = fs::rename(tmp_path, path) {
            let _ = fs::remove_file(tmp_path);
            return Err(e.into());
        }
        log::debug!("saved configuration to {}", path.display());
        Ok(())
    }
}
