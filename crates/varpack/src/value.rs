//! The dynamically typed value understood by the Any codec.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value as JsonValue};
use varpack_buffers::MAX_SAFE_INTEGER;

/// A value that can be written with [`WriteAny`](crate::WriteAny) and read
/// back with [`ReadAny`](crate::ReadAny).
///
/// `Integer` and `Float` are two spellings of one numeric kind: the encoder
/// picks the most compact wire form from the value alone, so a decoded
/// number may come back as the other variant. Equality reflects this, and
/// `Float(16.0) == Integer(16)`. The comparison is exact: an `Integer` equals
/// a `Float` only if the float holds precisely that integer.
///
/// An `Integer` beyond `±(2^53 - 1)` has no exact float form, so it is written
/// with the 8-byte tag and decodes as `BigInt`.
///
/// `Object` keeps insertion order; equality between objects ignores order.
#[derive(Debug, Clone, Default)]
pub enum AnyValue {
    /// No value at all. Distinct from `Null`, and kept inside objects.
    #[default]
    Undefined,
    Null,
    Integer(i64),
    Float(f64),
    /// A 64-bit integer that is always written as 8 big-endian bytes.
    BigInt(i64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<AnyValue>),
    Object(IndexMap<String, AnyValue>),
}

impl AnyValue {
    /// Numeric value of `Integer` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnyValue::Integer(i) => Some(*i as f64),
            AnyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, AnyValue::Undefined)
    }

    /// Builds an `Object` from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AnyValue)>,
    {
        AnyValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyValue::Undefined, AnyValue::Undefined) => true,
            (AnyValue::Null, AnyValue::Null) => true,
            (AnyValue::Integer(a), AnyValue::Integer(b)) => a == b,
            (AnyValue::BigInt(a), AnyValue::BigInt(b)) => a == b,
            (AnyValue::Bool(a), AnyValue::Bool(b)) => a == b,
            (AnyValue::Str(a), AnyValue::Str(b)) => a == b,
            (AnyValue::Bytes(a), AnyValue::Bytes(b)) => a == b,
            (AnyValue::Array(a), AnyValue::Array(b)) => a == b,
            (AnyValue::Object(a), AnyValue::Object(b)) => a == b,
            (AnyValue::Float(a), AnyValue::Float(b)) => a == b,
            (AnyValue::Integer(i), AnyValue::Float(f))
            | (AnyValue::Float(f), AnyValue::Integer(i)) => float_is_integer(*f, *i),
            _ => false,
        }
    }
}

/// `f` is exactly `i`. Widening to `i128` keeps `2^63` apart from `i64::MAX`.
fn float_is_integer(f: f64, i: i64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f as i128 == i as i128
}

impl From<bool> for AnyValue {
    fn from(b: bool) -> Self {
        AnyValue::Bool(b)
    }
}

impl From<i32> for AnyValue {
    fn from(i: i32) -> Self {
        AnyValue::Integer(i as i64)
    }
}

impl From<i64> for AnyValue {
    fn from(i: i64) -> Self {
        AnyValue::Integer(i)
    }
}

impl From<f64> for AnyValue {
    fn from(f: f64) -> Self {
        AnyValue::Float(f)
    }
}

impl From<&str> for AnyValue {
    fn from(s: &str) -> Self {
        AnyValue::Str(s.to_owned())
    }
}

impl From<String> for AnyValue {
    fn from(s: String) -> Self {
        AnyValue::Str(s)
    }
}

impl From<Vec<u8>> for AnyValue {
    fn from(b: Vec<u8>) -> Self {
        AnyValue::Bytes(b)
    }
}

impl From<Vec<AnyValue>> for AnyValue {
    fn from(items: Vec<AnyValue>) -> Self {
        AnyValue::Array(items)
    }
}

impl From<IndexMap<String, AnyValue>> for AnyValue {
    fn from(map: IndexMap<String, AnyValue>) -> Self {
        AnyValue::Object(map)
    }
}

impl<T: Into<AnyValue>> From<Option<T>> for AnyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AnyValue::Undefined, Into::into)
    }
}

impl From<JsonValue> for AnyValue {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => AnyValue::Null,
            JsonValue::Bool(b) => AnyValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => AnyValue::Integer(i),
                None => AnyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => AnyValue::Str(s),
            JsonValue::Array(items) => {
                AnyValue::Array(items.into_iter().map(AnyValue::from).collect())
            }
            JsonValue::Object(map) => AnyValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, AnyValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// JSON has no `undefined`, binary, or non-finite numbers: `Undefined` and
/// `NaN`/`±inf` become `null`, and bytes become an array of numbers.
/// Integral floats within the safe integer range become JSON integers.
impl From<AnyValue> for JsonValue {
    fn from(v: AnyValue) -> Self {
        match v {
            AnyValue::Undefined | AnyValue::Null => JsonValue::Null,
            AnyValue::Integer(i) | AnyValue::BigInt(i) => JsonValue::Number(i.into()),
            AnyValue::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64 => {
                JsonValue::Number((f as i64).into())
            }
            AnyValue::Float(f) => Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
            AnyValue::Bool(b) => JsonValue::Bool(b),
            AnyValue::Str(s) => JsonValue::String(s),
            AnyValue::Bytes(bytes) => {
                JsonValue::Array(bytes.into_iter().map(JsonValue::from).collect())
            }
            AnyValue::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            AnyValue::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect::<Map<String, JsonValue>>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_equality_crosses_variants() {
        assert_eq!(AnyValue::Float(16.0), AnyValue::Integer(16));
        assert_eq!(AnyValue::Integer(-3), AnyValue::Float(-3.0));
        assert_ne!(AnyValue::Float(16.5), AnyValue::Integer(16));
        assert_ne!(AnyValue::BigInt(16), AnyValue::Integer(16));
        assert_ne!(AnyValue::Null, AnyValue::Undefined);
    }

    #[test]
    fn test_numeric_equality_is_exact() {
        let above = AnyValue::Integer((1 << 53) + 1);
        let rounded = AnyValue::Float(9_007_199_254_740_992.0);
        assert_ne!(above, rounded);
        assert_ne!(rounded, above);
        assert_eq!(rounded, AnyValue::Integer(1 << 53));
        assert_ne!(
            AnyValue::Integer(i64::MAX),
            AnyValue::Float(i64::MAX as f64)
        );
        assert_ne!(AnyValue::Integer(0), AnyValue::Float(f64::NAN));
        assert_eq!(AnyValue::Integer(0), AnyValue::Float(-0.0));
    }

    #[test]
    fn test_object_equality_ignores_order() {
        let a = AnyValue::object([("x", AnyValue::from(1)), ("y", AnyValue::Undefined)]);
        let b = AnyValue::object([("y", AnyValue::Undefined), ("x", AnyValue::from(1))]);
        let c = AnyValue::object([("x", AnyValue::from(1))]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_json_conversion() {
        let json = json!({"name": "Alice", "age": 16, "score": 1.5, "tags": [true, null]});
        let value = AnyValue::from(json.clone());
        assert_eq!(
            value,
            AnyValue::object([
                ("name", AnyValue::from("Alice")),
                ("age", AnyValue::from(16)),
                ("score", AnyValue::from(1.5)),
                (
                    "tags",
                    AnyValue::Array(vec![AnyValue::Bool(true), AnyValue::Null])
                ),
            ])
        );
        assert_eq!(JsonValue::from(value), json);
    }

    #[test]
    fn test_json_lossy_variants() {
        assert_eq!(JsonValue::from(AnyValue::Undefined), JsonValue::Null);
        assert_eq!(JsonValue::from(AnyValue::Float(f64::NAN)), JsonValue::Null);
        assert_eq!(JsonValue::from(AnyValue::Bytes(vec![1, 2])), json!([1, 2]));
        assert_eq!(JsonValue::from(AnyValue::Float(3.0)), json!(3));
        assert_eq!(AnyValue::from(None::<i64>), AnyValue::Undefined);
    }
}
