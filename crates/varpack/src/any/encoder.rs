//! Any encoder.

use varpack_buffers::{is_float32, Encoder, MAX_SAFE_INTEGER};

use super::constants::*;
use crate::AnyValue;

/// Writes [`AnyValue`]s in the self-describing format.
pub trait WriteAny {
    /// Appends `value`, recursing into arrays and objects.
    ///
    /// Recursion depth equals the value's nesting depth. Values nested deeper
    /// than [`MAX_DEPTH`] encode fine but will be rejected by the decoder.
    fn write_any(&mut self, value: &AnyValue);
}

impl WriteAny for Encoder {
    fn write_any(&mut self, value: &AnyValue) {
        match value {
            AnyValue::Undefined => self.write(TAG_UNDEFINED),
            AnyValue::Null => self.write(TAG_NULL),
            AnyValue::Integer(i) => write_integer(self, *i),
            AnyValue::Float(f) => write_float(self, *f),
            AnyValue::BigInt(i) => {
                self.write(TAG_BIGINT);
                self.write_i64(*i);
            }
            AnyValue::Bool(false) => self.write(TAG_FALSE),
            AnyValue::Bool(true) => self.write(TAG_TRUE),
            AnyValue::Str(s) => {
                self.write(TAG_STRING);
                self.write_var_string(s);
            }
            AnyValue::Object(map) => {
                self.write(TAG_OBJECT);
                self.write_var_uint(map.len() as u64);
                for (key, item) in map {
                    self.write_var_string(key);
                    self.write_any(item);
                }
            }
            AnyValue::Array(items) => {
                self.write(TAG_ARRAY);
                self.write_var_uint(items.len() as u64);
                for item in items {
                    self.write_any(item);
                }
            }
            AnyValue::Bytes(bytes) => {
                self.write(TAG_BYTES);
                self.write_var_bytes(bytes);
            }
        }
    }
}

/// Integers past the safe range would be rounded as floats, so they take
/// the 8-byte integer tag instead.
fn write_integer(encoder: &mut Encoder, value: i64) {
    let magnitude = value.unsigned_abs();
    if magnitude <= MAX_TAGGED_INTEGER {
        encoder.write(TAG_INTEGER);
        encoder.write_var_int(value);
    } else if magnitude <= MAX_SAFE_INTEGER {
        write_wide_float(encoder, value as f64);
    } else {
        encoder.write(TAG_BIGINT);
        encoder.write_i64(value);
    }
}

fn write_float(encoder: &mut Encoder, value: f64) {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_TAGGED_INTEGER as f64 {
        // sign taken from the float so -0.0 keeps its sign bit
        encoder.write(TAG_INTEGER);
        encoder.write_var_int_parts(value.is_sign_negative(), value.abs() as u64);
    } else {
        write_wide_float(encoder, value);
    }
}

fn write_wide_float(encoder: &mut Encoder, value: f64) {
    if is_float32(value) {
        encoder.write(TAG_FLOAT32);
        encoder.write_f32(value as f32);
    } else {
        encoder.write(TAG_FLOAT64);
        encoder.write_f64(value);
    }
}

/// Encodes a single value into a fresh byte vector.
pub fn encode_any(value: &AnyValue) -> Vec<u8> {
    let mut encoder = Encoder::new();
    encoder.write_any(value);
    encoder.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tags() {
        assert_eq!(encode_any(&AnyValue::Undefined), vec![127]);
        assert_eq!(encode_any(&AnyValue::Null), vec![126]);
        assert_eq!(encode_any(&AnyValue::Bool(false)), vec![121]);
        assert_eq!(encode_any(&AnyValue::Bool(true)), vec![120]);
        assert_eq!(encode_any(&AnyValue::from("ab")), vec![119, 2, b'a', b'b']);
        assert_eq!(encode_any(&AnyValue::Bytes(vec![9])), vec![116, 1, 9]);
    }

    #[test]
    fn test_number_dispatch() {
        assert_eq!(encode_any(&AnyValue::Integer(16)), vec![125, 16]);
        assert_eq!(encode_any(&AnyValue::Integer(-1)), vec![125, 0x41]);
        assert_eq!(encode_any(&AnyValue::Float(16.0)), vec![125, 16]);
        assert_eq!(encode_any(&AnyValue::Float(-0.0)), vec![125, 0x40]);
        assert_eq!(encode_any(&AnyValue::Float(0.5)), vec![124, 0x3F, 0x00, 0x00, 0x00]);
        assert_eq!(encode_any(&AnyValue::Float(0.1))[0], 123);
        assert_eq!(encode_any(&AnyValue::Float(0.1)).len(), 9);
        // 2^31 no longer fits the varint tag but is exact in single precision
        assert_eq!(
            encode_any(&AnyValue::Integer(1 << 31)),
            vec![124, 0x4F, 0x00, 0x00, 0x00]
        );
        assert_eq!(encode_any(&AnyValue::Integer((1 << 31) + 1))[0], 123);
    }

    #[test]
    fn test_max_tagged_integer_boundary() {
        let bytes = encode_any(&AnyValue::Integer(i32::MAX as i64));
        assert_eq!(bytes[0], TAG_INTEGER);
        let bytes = encode_any(&AnyValue::Integer(-(i32::MAX as i64)));
        assert_eq!(bytes[0], TAG_INTEGER);
        let bytes = encode_any(&AnyValue::Integer(i32::MIN as i64));
        assert_eq!(bytes[0], TAG_FLOAT32);
    }

    #[test]
    fn test_unsafe_integer_takes_bigint_tag() {
        assert_eq!(
            encode_any(&AnyValue::Integer(MAX_SAFE_INTEGER as i64))[0],
            TAG_FLOAT64
        );
        let above = (1i64 << 53) + 1;
        let bytes = encode_any(&AnyValue::Integer(above));
        assert_eq!(bytes[0], TAG_BIGINT);
        assert_eq!(bytes[1..], above.to_be_bytes());
        assert_eq!(encode_any(&AnyValue::Integer(i64::MIN))[0], TAG_BIGINT);
    }

    #[test]
    fn test_bigint_is_big_endian() {
        assert_eq!(
            encode_any(&AnyValue::BigInt(1)),
            vec![122, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_composites() {
        let value = AnyValue::object([(
            "a",
            AnyValue::Array(vec![AnyValue::Integer(1), AnyValue::Undefined]),
        )]);
        assert_eq!(
            encode_any(&value),
            vec![118, 1, 1, b'a', 117, 2, 125, 1, 127]
        );
    }
}
