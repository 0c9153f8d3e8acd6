//! Bit masks and numeric limits shared by the encoder and decoder.

/// Sign flag in the first byte of a signed varint.
pub const BIT7: u8 = 0b0100_0000;
/// Continuation flag of every varint byte.
pub const BIT8: u8 = 0b1000_0000;

/// Low 6 bits: magnitude bits in the first byte of a signed varint.
pub const BITS6: u8 = 0b0011_1111;
/// Low 7 bits: data bits of a varint byte.
pub const BITS7: u8 = 0b0111_1111;

/// Largest integer a varint decode accepts (`2^53 - 1`).
///
/// The wire format only guarantees exact round trips up to this bound, so
/// decoding anything larger fails with
/// [`CodecError::IntegerOutOfRange`](crate::CodecError::IntegerOutOfRange).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Size of the first chunk allocated by [`Encoder::new`](crate::Encoder::new).
pub const DEFAULT_CHUNK_SIZE: usize = 100;
