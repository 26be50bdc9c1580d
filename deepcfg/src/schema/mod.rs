//! Static schema trees.
//!
//! A [`Schema`] mirrors the shape of a valid configuration. Each top-level
//! entry is a *section* stored in its own file. Below that, a [`Branch`] maps
//! keys to child nodes, a [`LeafSpec`] declares the type and default of one
//! value, and a sequence node validates every element of a list of mappings.
//!
//! The key [`WILDCARD`] inside a branch stands for every key that currently
//! exists at that position in the live configuration. It is how sections with
//! user-named children (losses, metrics) are described.
//!
//! # Examples
//!
//! ```
//! use deepcfg::schema::{Branch, LeafSpec, Schema, WILDCARD};
//! use deepcfg::{DType, Value};
//!
//! let schema = Schema::new(
//!     1,
//!     Branch::new()
//!         .entry(
//!             "training",
//!             Branch::new().entry("num_epochs", LeafSpec::new(DType::Int, 10)),
//!         )
//!         .entry(
//!             "losses",
//!             Branch::new().entry(
//!                 WILDCARD,
//!                 Branch::new()
//!                     .entry("weight", LeafSpec::new(DType::Float, 1.0))
//!                     .entry("kwargs", LeafSpec::new(DType::Dict, Value::empty_map())),
//!             ),
//!         ),
//! );
//!
//! assert_eq!(schema.section_names().collect::<Vec<_>>(), vec!["training", "losses"]);
//! ```

mod builtin;
mod dtype;

use crate::namespace::Value;

pub use builtin::{builtin, SCHEMA_VERSION};
pub use dtype::DType;

/// Schema key matching every existing key at its position.
pub const WILDCARD: &str = "*";

/// Declaration of a single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafSpec {
    /// Target type, or `None` to accept any present value untouched.
    pub dtype: Option<DType>,
    /// Value used when the key is absent or its value is rejected.
    pub default: Value,
    /// Example value for generated templates. Never used by validation.
    pub init: Option<Value>,
}

impl LeafSpec {
    /// Declares a typed leaf.
    #[must_use]
    pub fn new(dtype: DType, default: impl Into<Value>) -> Self {
        Self {
            dtype: Some(dtype),
            default: default.into(),
            init: None,
        }
    }

    /// Declares a leaf that only names a permitted key.
    ///
    /// Opaque leaves are neither defaulted nor coerced.
    #[must_use]
    pub fn opaque(default: impl Into<Value>) -> Self {
        Self {
            dtype: None,
            default: default.into(),
            init: None,
        }
    }

    /// Attaches an example value for templates.
    #[must_use]
    pub fn init(mut self, example: impl Into<Value>) -> Self {
        self.init = Some(example.into());
        self
    }

    /// The value a generated template should show for this leaf.
    #[must_use]
    pub fn sample(&self) -> &Value {
        self.init.as_ref().unwrap_or(&self.default)
    }
}

/// An interior schema node: an ordered set of named children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    entries: Vec<(String, SchemaNode)>,
    placeholder: Option<String>,
}

impl Branch {
    /// Creates an empty branch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child. Declaration order is validation order.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.entries.push((key.into(), node.into()));
        self
    }

    /// Names the example child used for this branch's wildcard entry.
    ///
    /// The placeholder only ever supplies a key; values always come from
    /// the wildcard subtree's own leaf defaults.
    #[must_use]
    pub fn placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholder = Some(name.into());
        self
    }

    /// Iterates over the children in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the child declared under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The wildcard placeholder name, if one was declared.
    #[must_use]
    pub fn placeholder_name(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns `true` if the branch has a [`WILDCARD`] entry.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.get(WILDCARD).is_some()
    }
}

/// A node of the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Interior node with named children.
    Branch(Branch),
    /// A declared value.
    Leaf(LeafSpec),
    /// A list whose every element is a mapping validated against the branch.
    Sequence(Branch),
}

impl SchemaNode {
    /// Declares a list of mappings, each validated against `item`.
    #[must_use]
    pub fn sequence(item: Branch) -> Self {
        Self::Sequence(item)
    }
}

impl From<LeafSpec> for SchemaNode {
    fn from(leaf: LeafSpec) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Branch> for SchemaNode {
    fn from(branch: Branch) -> Self {
        Self::Branch(branch)
    }
}

/// A versioned schema whose top-level entries are configuration sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    version: u32,
    sections: Branch,
}

impl Schema {
    /// Creates a schema from its section branch.
    #[must_use]
    pub const fn new(version: u32, sections: Branch) -> Self {
        Self { version, sections }
    }

    /// Schema version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// The root branch, one entry per section.
    #[must_use]
    pub const fn root(&self) -> &Branch {
        &self.sections
    }

    /// Returns the schema subtree of a section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SchemaNode> {
        self.sections.get(name)
    }

    /// Iterates over section names in declaration order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.entries().map(|(name, _)| name)
    }
}
