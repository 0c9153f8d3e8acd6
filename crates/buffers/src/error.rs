//! Decoder error type.

use thiserror::Error;

/// Error raised when a byte sequence is not valid output of this codec.
///
/// Every variant is fatal to the read that produced it. Decoders never
/// repair or retry; the surrounding operation should be aborted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A variable-length integer exceeds [`MAX_SAFE_INTEGER`](crate::MAX_SAFE_INTEGER).
    #[error("integer out of range")]
    IntegerOutOfRange,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unrecognized tag {0}")]
    UnrecognizedTag(u8),
    #[error("value nesting exceeds the maximum depth")]
    NestingTooDeep,
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
}
