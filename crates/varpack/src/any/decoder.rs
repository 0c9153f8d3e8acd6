//! Any decoder.

use indexmap::IndexMap;
use tracing::debug;
use varpack_buffers::{CodecError, Decoder};

use super::constants::*;
use crate::AnyValue;

/// Reads [`AnyValue`]s written by [`WriteAny`](crate::WriteAny).
pub trait ReadAny {
    /// Decodes the next value.
    ///
    /// Fails with [`CodecError::UnrecognizedTag`] on a tag outside 116..=127,
    /// and with [`CodecError::NestingTooDeep`] past [`MAX_DEPTH`] levels of
    /// arrays/objects. Primitive read errors propagate unchanged.
    fn read_any(&mut self) -> Result<AnyValue, CodecError>;
}

impl ReadAny for Decoder<'_> {
    fn read_any(&mut self) -> Result<AnyValue, CodecError> {
        read_value(self, 0)
    }
}

fn read_value(decoder: &mut Decoder<'_>, depth: usize) -> Result<AnyValue, CodecError> {
    let tag = decoder.read_u8()?;
    let value = match tag {
        TAG_UNDEFINED => AnyValue::Undefined,
        TAG_NULL => AnyValue::Null,
        TAG_INTEGER => {
            let (negative, magnitude) = decoder.read_var_int_parts()?;
            match (negative, magnitude) {
                (true, 0) => AnyValue::Float(-0.0),
                (true, m) => AnyValue::Integer(-(m as i64)),
                (false, m) => AnyValue::Integer(m as i64),
            }
        }
        TAG_FLOAT32 => AnyValue::Float(decoder.read_f32()? as f64),
        TAG_FLOAT64 => AnyValue::Float(decoder.read_f64()?),
        TAG_BIGINT => AnyValue::BigInt(decoder.read_i64()?),
        TAG_FALSE => AnyValue::Bool(false),
        TAG_TRUE => AnyValue::Bool(true),
        TAG_STRING => AnyValue::Str(decoder.read_var_string()?.to_owned()),
        TAG_OBJECT => {
            let depth = descend(depth)?;
            let len = read_len(decoder)?;
            let mut map = IndexMap::with_capacity(len.min(decoder.remaining()));
            for _ in 0..len {
                let key = decoder.read_var_string()?.to_owned();
                let item = read_value(decoder, depth)?;
                map.insert(key, item);
            }
            AnyValue::Object(map)
        }
        TAG_ARRAY => {
            let depth = descend(depth)?;
            let len = read_len(decoder)?;
            let mut items = Vec::with_capacity(len.min(decoder.remaining()));
            for _ in 0..len {
                items.push(read_value(decoder, depth)?);
            }
            AnyValue::Array(items)
        }
        TAG_BYTES => AnyValue::Bytes(decoder.read_var_bytes()?.to_vec()),
        other => return Err(CodecError::UnrecognizedTag(other)),
    };
    Ok(value)
}

fn descend(depth: usize) -> Result<usize, CodecError> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::NestingTooDeep);
    }
    Ok(depth + 1)
}

fn read_len(decoder: &mut Decoder<'_>) -> Result<usize, CodecError> {
    let len = decoder.read_var_uint()?;
    usize::try_from(len).map_err(|_| CodecError::IntegerOutOfRange)
}

/// Decodes a single value from the start of `data`.
///
/// Trailing bytes after the value are ignored.
pub fn decode_any(data: &[u8]) -> Result<AnyValue, CodecError> {
    let mut decoder = Decoder::new(data);
    match decoder.read_any() {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!(position = decoder.position(), %err, "any decode failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_any;

    #[test]
    fn test_unrecognized_tag() {
        assert_eq!(decode_any(&[115]), Err(CodecError::UnrecognizedTag(115)));
        assert_eq!(decode_any(&[0]), Err(CodecError::UnrecognizedTag(0)));
        assert_eq!(decode_any(&[128]), Err(CodecError::UnrecognizedTag(128)));
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(decode_any(&[]), Err(CodecError::UnexpectedEndOfInput));
        assert_eq!(decode_any(&[123, 0, 0]), Err(CodecError::UnexpectedEndOfInput));
        assert_eq!(decode_any(&[117, 2, 126]), Err(CodecError::UnexpectedEndOfInput));
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        let value = decode_any(&encode_any(&AnyValue::Float(-0.0))).unwrap();
        match value {
            AnyValue::Float(f) => assert!(f == 0.0 && f.is_sign_negative()),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let mut data = vec![TAG_ARRAY, 1].repeat(MAX_DEPTH);
        data.push(TAG_NULL);
        assert!(decode_any(&data).is_ok());

        let mut data = vec![TAG_ARRAY, 1].repeat(MAX_DEPTH + 1);
        data.push(TAG_NULL);
        assert_eq!(decode_any(&data), Err(CodecError::NestingTooDeep));
    }

    #[test]
    fn test_huge_declared_length_does_not_preallocate() {
        // declares 2^53 - 1 elements but carries none
        let data = [TAG_ARRAY, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        assert_eq!(decode_any(&data), Err(CodecError::UnexpectedEndOfInput));
    }
}
