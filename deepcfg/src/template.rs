//! Sample configurations generated from a schema.
//!
//! A sample shows every declared key with its example value (or its default
//! when no example is declared). Wildcard sections get one child named after
//! the branch placeholder and sequences get a single example element, so the
//! generated files double as documentation of the expected layout.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::namespace::{Namespace, Value};
use crate::schema::{Branch, Schema, SchemaNode, WILDCARD};
use crate::store::ConfigStore;

/// Builds a complete sample configuration for `schema`.
///
/// # Examples
///
/// ```
/// use deepcfg::template::sample_config;
/// use deepcfg::Value;
///
/// let sample = sample_config(&deepcfg::schema::builtin());
/// let module = sample.get(&["optimizer", "module"]).unwrap();
/// assert_eq!(module.to_value(), Value::from("torch.optim"));
/// assert!(sample.check("loss", &["losses"]));
/// ```
#[must_use]
pub fn sample_config(schema: &Schema) -> Namespace {
    sample_branch(schema.root())
}

fn sample_branch(branch: &Branch) -> Namespace {
    let mut space = Namespace::new();
    for (name, node) in branch.entries() {
        let key = if name == WILDCARD {
            match branch.placeholder_name() {
                Some(placeholder) => placeholder,
                None => continue,
            }
        } else {
            name
        };
        space.insert(key, sample_node(node));
    }
    space
}

fn sample_node(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Leaf(leaf) => leaf.sample().clone(),
        SchemaNode::Branch(branch) => Value::Map(sample_branch(branch)),
        SchemaNode::Sequence(item) => Value::List(vec![Value::Map(sample_branch(item))]),
    }
}

impl ConfigStore {
    /// Writes a sample configuration for the store's schema to `directory`,
    /// one file per section. The live configuration is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileExists`] if a section file is already present and
    /// `force` is not set, or an I/O error if writing fails.
    pub fn write_template(&self, directory: &Path, force: bool) -> Result<Vec<PathBuf>> {
        let sample = sample_config(self.schema());

        if !force {
            if let Some(path) = sample
                .keys()
                .map(|section| self.section_file(directory, section))
                .find(|path| path.exists())
            {
                return Err(Error::FileExists { path });
            }
        }

        std::fs::create_dir_all(directory)?;
        let mut written = Vec::new();
        for (section, value) in sample.items() {
            let Value::Map(space) = value else {
                continue;
            };
            let path = self.section_file(directory, section);
            space.save(&path)?;
            written.push(path);
        }
        log::debug!(
            "wrote {} template file(s) to {}",
            written.len(),
            directory.display()
        );
        Ok(written)
    }
}
