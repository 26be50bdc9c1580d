//! Coercion of raw configuration values to declared types.
//!
//! [`convert`] is pure: it returns the value that should be stored and,
//! when something had to be corrected, the [`Correction`] describing it.
//! Writing the value back and emitting the notification is the caller's job.
//!
//! # Conversion rules
//!
//! | Target  | Accepted input                                                    |
//! |---------|-------------------------------------------------------------------|
//! | `int`   | integers, floats without a fractional part, numeric strings       |
//! | `float` | floats, integers, numeric strings                                 |
//! | `str`   | strings, and booleans or numbers rendered as text                 |
//! | `bool`  | booleans, `0`/`1`, `true/false/yes/no/on/off` strings             |
//! | `dict`  | mappings                                                          |
//! | `[T]`   | lists whose every element converts to `T`                         |
//!
//! A list converts all-or-nothing: if one element is rejected the whole value
//! falls back to the default.

use crate::namespace::Value;
use crate::schema::DType;
use crate::validator::Correction;

/// The outcome of [`convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The value to store.
    pub value: Value,
    /// What was corrected, if anything.
    pub correction: Option<Correction>,
}

impl Conversion {
    fn unchanged(value: &Value) -> Self {
        Self {
            value: value.clone(),
            correction: None,
        }
    }
}

/// Converts `value` to `dtype`, falling back to `default`.
///
/// - `dtype` of `None` returns `value` untouched.
/// - A null `value` becomes `default`; this is reported unless the default
///   is itself empty (null or `{}`).
/// - A value equal to `default` is accepted as is, so a default of a
///   different type than `dtype` stays stable across validations.
/// - Otherwise the value is converted, or replaced by `default` with a
///   [`Correction::TypeCoercionFailed`] if it cannot be.
///
/// `path` is only used to label the correction.
///
/// # Examples
///
/// ```
/// use deepcfg::coerce::convert;
/// use deepcfg::{DType, Value};
///
/// let ok = convert(&Value::from("5"), Some(&DType::Int), &Value::from(0), "training/accumulate");
/// assert_eq!(ok.value, Value::from(5));
///
/// let rejected = convert(&Value::from("abc"), Some(&DType::Int), &Value::from(0), "training/accumulate");
/// assert_eq!(rejected.value, Value::from(0));
/// assert!(rejected.correction.is_some());
/// ```
#[must_use]
pub fn convert(value: &Value, dtype: Option<&DType>, default: &Value, path: &str) -> Conversion {
    let Some(dtype) = dtype else {
        return Conversion::unchanged(value);
    };

    if value.is_null() {
        let correction = (!default.is_empty_default()).then(|| Correction::ValueNotSet {
            path: path.to_string(),
            default: default.clone(),
        });
        return Conversion {
            value: default.clone(),
            correction,
        };
    }

    if identical(value, default) {
        return Conversion::unchanged(value);
    }

    match coerce(value, dtype) {
        Some(converted) => {
            let correction = (!identical(&converted, value)).then(|| Correction::Coerced {
                path: path.to_string(),
                from: value.clone(),
                to: converted.clone(),
                dtype: dtype.name(),
            });
            Conversion {
                value: converted,
                correction,
            }
        }
        None => Conversion {
            value: default.clone(),
            correction: Some(Correction::TypeCoercionFailed {
                path: path.to_string(),
                value: value.clone(),
                dtype: dtype.name(),
                default: default.clone(),
            }),
        },
    }
}

/// Converts `value` to `dtype`, returning `None` if it cannot be converted.
///
/// Null never converts.
#[must_use]
pub fn coerce(value: &Value, dtype: &DType) -> Option<Value> {
    match dtype {
        DType::Int => to_int(value).map(Value::Int),
        DType::Float => to_float(value).map(Value::Float),
        DType::Str => to_str(value).map(Value::Str),
        DType::Bool => to_bool(value).map(Value::Bool),
        DType::Dict => value.as_map().cloned().map(Value::Map),
        DType::List(inner) => value
            .as_list()?
            .iter()
            .map(|item| coerce(item, inner))
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(x)
            if x.is_finite() && x.fract() == 0.0 && *x >= i64::MIN as f64 && *x < i64::MAX as f64 =>
        {
            Some(*x as i64)
        }
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(_) | Value::Int(_) => value.as_f64(),
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_str(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Bool(_) | Value::Int(_) | Value::Float(_) => Some(value.to_string()),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(0) => Some(false),
        Value::Int(1) => Some(true),
        Value::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Structural equality that treats floats by bit pattern, so `NaN` is
/// identical to itself.
fn identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| identical(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .items()
                    .zip(ys.items())
                    .all(|((kx, vx), (ky, vy))| kx == ky && identical(vx, vy))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Namespace;

    fn strings(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| Value::from(*s)).collect())
    }

    fn ints(items: &[i64]) -> Value {
        Value::List(items.iter().map(|i| Value::from(*i)).collect())
    }

    #[test]
    fn test_scalar_string_to_int() {
        let result = convert(&Value::from("5"), Some(&DType::Int), &Value::from(0), "a");
        assert_eq!(result.value, Value::from(5));
        assert!(matches!(result.correction, Some(Correction::Coerced { .. })));
    }

    #[test]
    fn test_scalar_rejection_names_value_dtype_and_default() {
        let result = convert(&Value::from("abc"), Some(&DType::Int), &Value::from(0), "a/b");
        assert_eq!(result.value, Value::from(0));

        let correction = result.correction.expect("rejection must be reported");
        let message = correction.to_string();
        assert!(message.contains("abc"));
        assert!(message.contains("int"));
        assert!(message.contains('0'));
        assert!(message.contains("a/b"));
    }

    #[test]
    fn test_list_converts_every_element() {
        let dtype = DType::list(DType::Int);
        let result = convert(&strings(&["1", "2", "3"]), Some(&dtype), &Value::List(vec![]), "a");
        assert_eq!(result.value, ints(&[1, 2, 3]));
    }

    #[test]
    fn test_list_is_all_or_nothing() {
        let dtype = DType::list(DType::Int);
        let result = convert(&strings(&["1", "x", "3"]), Some(&dtype), &Value::List(vec![]), "a");
        assert_eq!(result.value, Value::List(vec![]));
        assert!(matches!(
            result.correction,
            Some(Correction::TypeCoercionFailed { .. })
        ));
    }

    #[test]
    fn test_list_requires_a_sequence() {
        let dtype = DType::list(DType::Str);
        let result = convert(&Value::from("input.yaml"), Some(&dtype), &Value::Null, "a");
        assert_eq!(result.value, Value::Null);
        assert!(result.correction.is_some());
    }

    #[test]
    fn test_nested_lists() {
        let dtype = DType::list(DType::list(DType::Int));
        let raw = Value::List(vec![strings(&["1", "28", "28"])]);
        let result = convert(&raw, Some(&dtype), &Value::Null, "model/input_size");
        assert_eq!(result.value, Value::List(vec![ints(&[1, 28, 28])]));
    }

    #[test]
    fn test_opaque_passthrough() {
        let raw = Value::from(vec![Value::from("anything"), Value::empty_map()]);
        let result = convert(&raw, None, &Value::Null, "optimizer/param_groups");
        assert_eq!(result.value, raw);
        assert!(result.correction.is_none());

        let result = convert(&Value::Null, None, &Value::from(3), "x");
        assert_eq!(result.value, Value::Null);
    }

    #[test]
    fn test_null_with_default_is_reported() {
        let result = convert(&Value::Null, Some(&DType::Int), &Value::from(10), "a");
        assert_eq!(result.value, Value::from(10));
        assert!(matches!(result.correction, Some(Correction::ValueNotSet { .. })));
    }

    #[test]
    fn test_null_with_empty_default_is_silent() {
        let result = convert(&Value::Null, Some(&DType::Str), &Value::Null, "a");
        assert_eq!(result.value, Value::Null);
        assert!(result.correction.is_none());

        let result = convert(&Value::Null, Some(&DType::Dict), &Value::empty_map(), "a");
        assert_eq!(result.value, Value::empty_map());
        assert!(result.correction.is_none());
    }

    #[test]
    fn test_value_equal_to_default_is_kept() {
        // device_ids defaults to "auto" although its type is [int]
        let dtype = DType::list(DType::Int);
        let result = convert(&Value::from("auto"), Some(&dtype), &Value::from("auto"), "a");
        assert_eq!(result.value, Value::from("auto"));
        assert!(result.correction.is_none());
    }

    #[test]
    fn test_already_typed_value_is_not_reported() {
        let result = convert(&Value::from(7), Some(&DType::Int), &Value::from(1), "a");
        assert_eq!(result, Conversion::unchanged(&Value::from(7)));

        let result = convert(&Value::Float(f64::NAN), Some(&DType::Float), &Value::Null, "a");
        assert!(result.correction.is_none());
    }

    #[test]
    fn test_int_from_float() {
        assert_eq!(coerce(&Value::from(3.0), &DType::Int), Some(Value::from(3)));
        assert_eq!(coerce(&Value::from(3.5), &DType::Int), None);
        assert_eq!(coerce(&Value::Float(f64::INFINITY), &DType::Int), None);
        assert_eq!(coerce(&Value::from(true), &DType::Int), None);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(coerce(&Value::from(1), &DType::Float), Some(Value::from(1.0)));
        assert_eq!(coerce(&Value::from(" 0.5 "), &DType::Float), Some(Value::from(0.5)));
        assert_eq!(coerce(&Value::from("half"), &DType::Float), None);
    }

    #[test]
    fn test_str_conversions() {
        assert_eq!(coerce(&Value::from(1), &DType::Str), Some(Value::from("1")));
        assert_eq!(coerce(&Value::from(false), &DType::Str), Some(Value::from("false")));
        assert_eq!(coerce(&Value::from(vec![]), &DType::Str), None);
        assert_eq!(coerce(&Value::empty_map(), &DType::Str), None);
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(coerce(&Value::from("Yes"), &DType::Bool), Some(Value::from(true)));
        assert_eq!(coerce(&Value::from("off"), &DType::Bool), Some(Value::from(false)));
        assert_eq!(coerce(&Value::from(1), &DType::Bool), Some(Value::from(true)));
        assert_eq!(coerce(&Value::from(2), &DType::Bool), None);
        assert_eq!(coerce(&Value::from("maybe"), &DType::Bool), None);
    }

    #[test]
    fn test_dict_conversions() {
        let kwargs: Namespace = [("gamma", 0.9)].into_iter().collect();
        assert_eq!(
            coerce(&Value::from(kwargs.clone()), &DType::Dict),
            Some(Value::from(kwargs))
        );
        assert_eq!(coerce(&Value::from("gamma=0.9"), &DType::Dict), None);
    }

    #[test]
    fn test_null_never_converts() {
        for dtype in [DType::Int, DType::Float, DType::Str, DType::Bool, DType::Dict] {
            assert_eq!(coerce(&Value::Null, &dtype), None);
        }
    }
}
