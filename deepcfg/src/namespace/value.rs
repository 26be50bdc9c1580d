//! Values stored in a [`Namespace`].

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::Namespace;

/// A configuration value.
///
/// Mappings are always stored as [`Namespace`]s so that nested values are
/// path-addressable wherever they came from (a parsed file, a schema default
/// or a coerced value).
///
/// # Examples
///
/// ```
/// use deepcfg::Value;
///
/// let value = Value::from(vec![Value::from(1), Value::from(2)]);
/// assert_eq!(value.to_string(), "[1, 2]");
/// assert_eq!(value.type_name(), "list");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// An explicit null (`~`, `null` or an empty YAML value).
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A nested mapping.
    Map(Namespace),
}

impl Value {
    /// Returns an empty mapping value.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(Namespace::new())
    }

    /// Returns `true` for `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this value counts as "no default".
    ///
    /// Null and the empty mapping are both treated as empty: substituting
    /// them for a missing value is silent.
    #[must_use]
    pub fn is_empty_default(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested namespace, if this is a mapping.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Namespace> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the nested namespace mutably, if this is a mapping.
    pub fn as_map_mut(&mut self) -> Option<&mut Namespace> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "dict",
        }
    }

    // Strings nested in containers are quoted so `["1", "x"]` and `[1, x]`
    // read differently.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.items().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Namespace> for Value {
    fn from(map: Namespace) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(5).to_string(), "5");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(0.95).to_string(), "0.95");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_display_nested_quotes_strings() {
        let value = Value::from(vec![Value::from("1"), Value::from("x"), Value::from(3)]);
        assert_eq!(value.to_string(), r#"["1", "x", 3]"#);
    }

    #[test]
    fn test_display_maps() {
        assert_eq!(Value::empty_map().to_string(), "{}");

        let map: Namespace = [("gamma", Value::from(0.95)), ("name", Value::from("lr"))]
            .into_iter()
            .collect();
        assert_eq!(Value::from(map).to_string(), r#"{gamma: 0.95, name: "lr"}"#);
    }

    #[test]
    fn test_empty_default() {
        assert!(Value::Null.is_empty_default());
        assert!(Value::empty_map().is_empty_default());
        assert!(!Value::from(0).is_empty_default());
        assert!(!Value::from(Vec::new()).is_empty_default());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(3).as_i64(), Some(3));
        assert_eq!(Value::from(3.5).as_i64(), None);
        assert_eq!(Value::from("cpu").as_str(), Some("cpu"));
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::empty_map().type_name(), "dict");
    }
}
