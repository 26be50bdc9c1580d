//! Schema-driven validation of live configurations.
//!
//! [`SchemaValidator`] walks a schema subtree and the matching part of a live
//! [`Namespace`] in lockstep. Missing values are filled from their declared
//! defaults, present values are coerced to their declared types, wildcard
//! entries are applied to every existing key, and interior mappings are
//! descended into. Every change is returned as a [`Correction`] and sent to
//! the validator's [`Notifier`].
//!
//! Validation is idempotent: running it again on its own output changes
//! nothing and reports nothing.

use std::fmt;

use crate::coerce::convert;
use crate::error::Result;
use crate::logging::{Notification, Notifier, Severity};
use crate::namespace::{join_path, Namespace, Value};
use crate::schema::{Branch, DType, LeafSpec, SchemaNode, WILDCARD};

/// A change the validator made to the live configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Correction {
    /// The key was absent; its default was inserted.
    ValueMissing {
        /// Full path of the value.
        path: String,
        /// The inserted default.
        default: Value,
    },

    /// The key was present but null; its default was applied.
    ValueNotSet {
        /// Full path of the value.
        path: String,
        /// The applied default.
        default: Value,
    },

    /// The value could not be converted; its default was applied.
    TypeCoercionFailed {
        /// Full path of the value.
        path: String,
        /// The rejected value.
        value: Value,
        /// Display name of the declared type.
        dtype: String,
        /// The applied default.
        default: Value,
    },

    /// The value was converted to its declared type.
    Coerced {
        /// Full path of the value.
        path: String,
        /// The value as written.
        from: Value,
        /// The converted value.
        to: Value,
        /// Display name of the declared type.
        dtype: String,
    },
}

impl Correction {
    /// Full path of the corrected value.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::ValueMissing { path, .. }
            | Self::ValueNotSet { path, .. }
            | Self::TypeCoercionFailed { path, .. }
            | Self::Coerced { path, .. } => path,
        }
    }

    /// How the correction is reported.
    ///
    /// Successful conversions are informational; anything that replaced the
    /// user's value with a default is a warning.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Coerced { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Returns `true` if the user's value was discarded.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::TypeCoercionFailed { .. })
    }

    /// Builds the notification sent for this correction.
    #[must_use]
    pub fn to_notification(&self) -> Notification {
        Notification::new(self.severity(), self.to_string())
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueMissing { path, default } => {
                write!(f, "{path} not found, default value applied: {default}")
            }
            Self::ValueNotSet { path, default } => {
                write!(f, "{path} not set, default value applied: {default}")
            }
            Self::TypeCoercionFailed {
                path,
                value,
                dtype,
                default,
            } => write!(
                f,
                "{path}: could not convert '{value}' to {dtype}, default value applied: {default}"
            ),
            Self::Coerced {
                path,
                from,
                to,
                dtype,
            } => write!(f, "{path}: converted '{from}' to {dtype} ({to})"),
        }
    }
}

/// How a wildcard entry treats a position with no existing keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WildcardPolicy {
    /// Apply the wildcard subtree to existing keys only. An empty section
    /// stays empty.
    #[default]
    ExistingOnly,
    /// When the position is empty, create one child named after the
    /// branch's placeholder and fill it with the subtree's defaults.
    Placeholder,
}

/// Walks schema subtrees over a live configuration, repairing it in place.
///
/// # Examples
///
/// ```
/// use deepcfg::logging::{RecordingNotifier, Severity};
/// use deepcfg::schema::{Branch, LeafSpec};
/// use deepcfg::validator::SchemaValidator;
/// use deepcfg::{DType, Namespace, Value};
///
/// let schema = Branch::new()
///     .entry("num_epochs", LeafSpec::new(DType::Int, 10))
///     .entry("accumulate", LeafSpec::new(DType::Int, 1));
///
/// let mut live = Namespace::from_yaml_str("training:\n  num_epochs: '25'\n").unwrap();
/// let recorder = RecordingNotifier::new();
/// let corrections = SchemaValidator::new(&recorder)
///     .validate(&schema, &mut live, &["training"])
///     .unwrap();
///
/// assert_eq!(corrections.len(), 2);
/// assert_eq!(recorder.count(Severity::Warning), 1);
/// let epochs = live.get(&["training", "num_epochs"]).unwrap();
/// assert_eq!(epochs.as_value(), Some(&Value::from(25)));
/// ```
pub struct SchemaValidator<'n> {
    notifier: &'n dyn Notifier,
    policy: WildcardPolicy,
}

impl<'n> SchemaValidator<'n> {
    /// Creates a validator reporting to `notifier`.
    #[must_use]
    pub fn new(notifier: &'n dyn Notifier) -> Self {
        Self {
            notifier,
            policy: WildcardPolicy::default(),
        }
    }

    /// Sets the wildcard policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: WildcardPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The wildcard policy in use.
    #[must_use]
    pub const fn policy(&self) -> WildcardPolicy {
        self.policy
    }

    /// Validates the mapping at `sub_space` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if `sub_space` does not resolve to a mapping.
    pub fn validate<S: AsRef<str>>(
        &self,
        schema: &Branch,
        live: &mut Namespace,
        sub_space: &[S],
    ) -> Result<Vec<Correction>> {
        let space = live.space_mut(sub_space)?;
        let mut path: Vec<String> = sub_space.iter().map(|s| s.as_ref().to_string()).collect();
        let mut corrections = Vec::new();
        self.walk_branch(schema, space, &mut path, &mut corrections);
        Ok(corrections)
    }

    /// Validates the top-level entry `name` of `live` against `node`.
    ///
    /// This is how a single configuration section is checked. A missing
    /// section is created.
    pub fn validate_section(&self, name: &str, node: &SchemaNode, live: &mut Namespace) -> Vec<Correction> {
        let mut path = vec![name.to_string()];
        let mut corrections = Vec::new();
        self.walk_node(node, live, name, &mut path, &mut corrections);
        corrections
    }

    fn walk_branch(
        &self,
        branch: &Branch,
        space: &mut Namespace,
        path: &mut Vec<String>,
        out: &mut Vec<Correction>,
    ) {
        for (name, node) in branch.entries() {
            for key in self.target_keys(branch, name, space) {
                path.push(key.clone());
                self.walk_node(node, space, &key, path, out);
                path.pop();
            }
        }
    }

    fn target_keys(&self, branch: &Branch, name: &str, space: &Namespace) -> Vec<String> {
        if name != WILDCARD {
            return vec![name.to_string()];
        }
        let existing: Vec<String> = space.keys().map(str::to_string).collect();
        match (self.policy, branch.placeholder_name()) {
            (WildcardPolicy::Placeholder, Some(placeholder)) if existing.is_empty() => {
                vec![placeholder.to_string()]
            }
            _ => existing,
        }
    }

    fn walk_node(
        &self,
        node: &SchemaNode,
        parent: &mut Namespace,
        key: &str,
        path: &mut Vec<String>,
        out: &mut Vec<Correction>,
    ) {
        match node {
            SchemaNode::Leaf(leaf) => self.check_leaf(leaf, parent, key, path, out),
            SchemaNode::Branch(branch) => {
                if let Some(space) = self.ensure_mapping(parent, key, path, out) {
                    self.walk_branch(branch, space, path, out);
                }
            }
            SchemaNode::Sequence(item) => self.walk_sequence(item, parent, key, path, out),
        }
    }

    fn check_leaf(
        &self,
        leaf: &LeafSpec,
        parent: &mut Namespace,
        key: &str,
        path: &[String],
        out: &mut Vec<Correction>,
    ) {
        let label = join_path(path);
        if let Some(slot) = parent.get_key_mut(key) {
            let conversion = convert(slot, leaf.dtype.as_ref(), &leaf.default, &label);
            *slot = conversion.value;
            if let Some(correction) = conversion.correction {
                self.report(correction, out);
            }
        } else if leaf.dtype.is_some() {
            parent.insert(key, leaf.default.clone());
            self.report(
                Correction::ValueMissing {
                    path: label,
                    default: leaf.default.clone(),
                },
                out,
            );
        }
    }

    fn ensure_mapping<'s>(
        &self,
        parent: &'s mut Namespace,
        key: &str,
        path: &[String],
        out: &mut Vec<Correction>,
    ) -> Option<&'s mut Namespace> {
        if !matches!(parent.get_key(key), Some(Value::Map(_))) {
            match parent.insert(key, Value::empty_map()) {
                None | Some(Value::Null) => {
                    log::debug!("created empty mapping at {}", join_path(path));
                }
                Some(rejected) => self.report(
                    Correction::TypeCoercionFailed {
                        path: join_path(path),
                        value: rejected,
                        dtype: DType::Dict.name(),
                        default: Value::empty_map(),
                    },
                    out,
                ),
            }
        }
        parent.get_key_mut(key).and_then(Value::as_map_mut)
    }

    fn walk_sequence(
        &self,
        item: &Branch,
        parent: &mut Namespace,
        key: &str,
        path: &mut Vec<String>,
        out: &mut Vec<Correction>,
    ) {
        if !matches!(parent.get_key(key), Some(Value::List(_))) {
            let label = join_path(path);
            let default = Value::List(Vec::new());
            let correction = match parent.insert(key, default.clone()) {
                None => Correction::ValueMissing {
                    path: label,
                    default,
                },
                Some(Value::Null) => Correction::ValueNotSet {
                    path: label,
                    default,
                },
                Some(rejected) => Correction::TypeCoercionFailed {
                    path: label,
                    value: rejected,
                    dtype: DType::list(DType::Dict).name(),
                    default,
                },
            };
            self.report(correction, out);
        }

        let Some(Value::List(items)) = parent.get_key_mut(key) else {
            return;
        };
        for (index, element) in items.iter_mut().enumerate() {
            path.push(index.to_string());
            if !matches!(element, Value::Map(_)) {
                let rejected = std::mem::replace(element, Value::empty_map());
                self.report(
                    Correction::TypeCoercionFailed {
                        path: join_path(path),
                        value: rejected,
                        dtype: DType::Dict.name(),
                        default: Value::empty_map(),
                    },
                    out,
                );
            }
            if let Value::Map(space) = element {
                self.walk_branch(item, space, path, out);
            }
            path.pop();
        }
    }

    fn report(&self, correction: Correction, out: &mut Vec<Correction>) {
        self.notifier.notify(&correction.to_notification());
        out.push(correction);
    }
}
