//! Ordered, path-addressable configuration trees.
//!
//! A [`Namespace`] is the runtime form of a configuration: an ordered mapping
//! from string keys to [`Value`]s, where nested mappings are themselves
//! namespaces. Insertion order is preserved so a saved file lists its keys in
//! the same order a human wrote them.
//!
//! # Paths
//!
//! Nodes are addressed by a *path*, an ordered list of keys. The empty path
//! denotes the root. A segment that parses as a decimal index selects an
//! element of a list, so `["data", "datasets", "0", "name"]` reaches into the
//! first dataset. Paths are rendered with [`PATH_DIVIDER`] in messages.
//!
//! Access is strict: reading a path that does not exist is an
//! [`Error::PathNotFound`]. Only the validator applies defaults.
//!
//! # Examples
//!
//! ```
//! use deepcfg::{Namespace, Value};
//!
//! let mut config = Namespace::from_yaml_str("project:\n  device: cuda\n").unwrap();
//! assert!(config.check("device", &["project"]));
//! assert!(!config.check("device_ids", &["project"]));
//!
//! let defaults: Namespace = [("device", "cpu"), ("session", "version01")]
//!     .into_iter()
//!     .collect();
//! config.add(defaults, &["project"]).unwrap();
//!
//! // Existing keys are left untouched
//! let device = config.get(&["project", "device"]).unwrap();
//! assert_eq!(device.as_value().and_then(Value::as_str), Some("cuda"));
//! ```

mod value;
mod yaml;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

pub use value::Value;

/// Separator used when a path is rendered as a single string.
pub const PATH_DIVIDER: &str = "/";

/// Renders a path as a single string, e.g. `training/scheduler/name`.
#[must_use]
pub fn join_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PATH_DIVIDER)
}

/// Splits a rendered path back into segments, ignoring empty segments.
///
/// A path containing `/` is split on `/` only, so keys with dots in them
/// (`losses/focal.v2/weight`) stay whole. A path without `/` is split on
/// `.` instead.
///
/// ```
/// use deepcfg::namespace::split_path;
///
/// assert_eq!(split_path("training/scheduler/name"), vec!["training", "scheduler", "name"]);
/// assert_eq!(split_path("training.scheduler.name"), vec!["training", "scheduler", "name"]);
/// assert_eq!(split_path("losses/focal.v2"), vec!["losses", "focal.v2"]);
/// assert!(split_path("").is_empty());
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    let divider = if path.contains('/') { '/' } else { '.' };
    path.split(divider)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// A node reached by [`Namespace::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// A mapping (including the root).
    Space(&'a Namespace),
    /// Anything that is not a mapping.
    Leaf(&'a Value),
}

impl<'a> Node<'a> {
    /// Returns the namespace if this node is a mapping.
    #[must_use]
    pub const fn as_space(self) -> Option<&'a Namespace> {
        match self {
            Self::Space(space) => Some(space),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the leaf value if this node is not a mapping.
    #[must_use]
    pub const fn as_value(self) -> Option<&'a Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Space(_) => None,
        }
    }

    /// Clones the node into an owned value.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Space(space) => Value::Map(space.clone()),
            Self::Leaf(value) => value.clone(),
        }
    }
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Map(space) => Self::Space(space),
            other => Self::Leaf(other),
        }
    }
}

/// An ordered mapping from unique string keys to [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    entries: Vec<(String, Value)>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of immediate children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is an immediate child.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns the immediate child `key`.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the immediate child `key` mutably.
    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Inserts or replaces an immediate child.
    ///
    /// A replaced key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.get_key_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Removes an immediate child, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over the immediate child keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over the immediate children in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if any segment is absent.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Result<Node<'_>> {
        if path.is_empty() {
            return Ok(Node::Space(self));
        }
        self.value(path)
            .map(Node::from)
            .ok_or_else(|| Error::PathNotFound {
                path: join_path(path),
            })
    }

    /// Returns the mapping at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the path is absent, or
    /// [`Error::NotAMapping`] if it resolves to a non-mapping value.
    pub fn space<S: AsRef<str>>(&self, path: &[S]) -> Result<&Namespace> {
        match self.get(path)? {
            Node::Space(space) => Ok(space),
            Node::Leaf(_) => Err(Error::NotAMapping {
                path: join_path(path),
            }),
        }
    }

    /// Returns the mapping at `path` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Namespace::space`].
    pub fn space_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Namespace> {
        if path.is_empty() {
            return Ok(self);
        }
        match self.value_mut(path) {
            Some(Value::Map(space)) => Ok(space),
            Some(_) => Err(Error::NotAMapping {
                path: join_path(path),
            }),
            None => Err(Error::PathNotFound {
                path: join_path(path),
            }),
        }
    }

    /// Returns `true` if `sub_space + [key]` resolves to a present node.
    ///
    /// An explicit `null` counts as present.
    #[must_use]
    pub fn check<S: AsRef<str>>(&self, key: &str, sub_space: &[S]) -> bool {
        match self.get(sub_space) {
            Ok(Node::Space(space)) => space.contains_key(key),
            Ok(Node::Leaf(Value::List(items))) => {
                key.parse::<usize>().is_ok_and(|index| index < items.len())
            }
            _ => false,
        }
    }

    /// Inserts every key of `mapping` that is not already present under
    /// `sub_space`. Existing keys are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `sub_space` does not resolve to a mapping.
    pub fn add<S: AsRef<str>>(&mut self, mapping: Namespace, sub_space: &[S]) -> Result<()> {
        let target = self.space_mut(sub_space)?;
        for (key, value) in mapping {
            if !target.contains_key(&key) {
                target.entries.push((key, value));
            }
        }
        Ok(())
    }

    /// Assigns `value` at `path`, replacing whatever was there.
    ///
    /// The parent of `path` must exist. Setting the root requires a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the parent is absent (or a list
    /// index is out of range) and [`Error::NotAMapping`] if the parent cannot
    /// hold children.
    pub fn set<S: AsRef<str>>(&mut self, path: &[S], value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        let Some((last, parent)) = path.split_last() else {
            return match value {
                Value::Map(space) => Ok(Some(Value::Map(std::mem::replace(self, space)))),
                _ => Err(Error::NotAMapping {
                    path: PATH_DIVIDER.to_string(),
                }),
            };
        };
        let last = last.as_ref();

        if parent.is_empty() {
            return Ok(self.insert(last, value));
        }
        match self.value_mut(parent) {
            Some(Value::Map(space)) => Ok(space.insert(last, value)),
            Some(Value::List(items)) => {
                let slot = last
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get_mut(index))
                    .ok_or_else(|| Error::PathNotFound {
                        path: join_path(path),
                    })?;
                Ok(Some(std::mem::replace(slot, value)))
            }
            Some(_) => Err(Error::NotAMapping {
                path: join_path(parent),
            }),
            None => Err(Error::PathNotFound {
                path: join_path(parent),
            }),
        }
    }

    /// Returns a deep copy sharing no state with `self`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn value<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get_key(first.as_ref())?;
        for segment in rest {
            current = match current {
                Value::Map(space) => space.get_key(segment.as_ref())?,
                Value::List(items) => items.get(segment.as_ref().parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    fn value_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get_key_mut(first.as_ref())?;
        for segment in rest {
            current = match current {
                Value::Map(space) => space.get_key_mut(segment.as_ref())?,
                Value::List(items) => items.get_mut(segment.as_ref().parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut space = Self::new();
        for (key, value) in iter {
            space.insert(key, value);
        }
        space
    }
}

impl IntoIterator for Namespace {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
