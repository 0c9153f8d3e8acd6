//! Binary encoder and decoder primitives for varpack.
//!
//! # Overview
//!
//! - [`Encoder`] - Appends bytes to a chunked, auto-growing buffer
//! - [`Decoder`] - Reads from a borrowed byte slice with cursor tracking
//! - [`CodecError`] - The errors a decoder can raise
//!
//! Both sides share the same wire primitives: fixed-width integers
//! (little-endian, except [`Encoder::write_u32_be`]), big-endian 64-bit
//! integers and IEEE-754 floats, base-128 variable-length integers, and
//! varint-length-prefixed byte strings.
//!
//! # Example
//!
//! ```
//! use varpack_buffers::{Decoder, Encoder};
//!
//! let mut encoder = Encoder::new();
//! encoder.write_u8(0x01);
//! encoder.write_var_int(-22);
//! encoder.write_var_string("hello");
//! let data = encoder.to_bytes();
//!
//! let mut decoder = Decoder::new(&data);
//! assert_eq!(decoder.read_u8().unwrap(), 0x01);
//! assert_eq!(decoder.read_var_int().unwrap(), -22);
//! assert_eq!(decoder.read_var_string().unwrap(), "hello");
//! assert!(!decoder.has_content());
//! ```

pub mod constants;
mod decoder;
mod encoder;
mod error;
mod is_float32;

pub use constants::MAX_SAFE_INTEGER;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::CodecError;
pub use is_float32::is_float32;
