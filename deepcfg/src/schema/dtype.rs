//! Declared data types for leaf specs.

use std::fmt;

/// The type a configuration value is coerced to.
///
/// List types nest: `DType::list(DType::list(DType::Int))` is a sequence of
/// sequences of integers. A leaf whose type is "anything" is expressed by
/// `None` at the [`LeafSpec`](super::LeafSpec) level, not by a variant here.
///
/// # Examples
///
/// ```
/// use deepcfg::DType;
///
/// assert_eq!(DType::Int.name(), "int");
/// assert_eq!(DType::list(DType::list(DType::Int)).name(), "[[int]]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DType {
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// String.
    Str,
    /// Boolean.
    Bool,
    /// Arbitrary mapping.
    Dict,
    /// Homogeneous sequence of the inner type.
    List(Box<DType>),
}

impl DType {
    /// Wraps `inner` in a sequence type.
    #[must_use]
    pub fn list(inner: DType) -> Self {
        Self::List(Box::new(inner))
    }

    /// Canonical display name used in messages.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::List(inner) => format!("[{}]", inner.name()),
            scalar => scalar.scalar_name().to_string(),
        }
    }

    const fn scalar_name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Dict => "dict",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
