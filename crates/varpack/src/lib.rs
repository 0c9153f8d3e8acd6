//! Compact self-describing binary codec with run-length and diff encoders.
//!
//! Built on the [`Encoder`]/[`Decoder`] primitives of `varpack-buffers`:
//!
//! - [`any`] - tagged encoding of dynamically typed [`AnyValue`]s
//! - [`rle`] - paired stateful encoders/decoders that exploit repeated
//!   values, ascending sequences and small diffs
//!
//! # Example
//!
//! ```
//! use varpack::{AnyValue, Decoder, Encoder, ReadAny, WriteAny};
//!
//! let value = AnyValue::object([
//!     ("name", AnyValue::from("Alice")),
//!     ("age", AnyValue::Undefined),
//! ]);
//!
//! let mut encoder = Encoder::new();
//! encoder.write_any(&value);
//! let data = encoder.to_bytes();
//!
//! let mut decoder = Decoder::new(&data);
//! assert_eq!(decoder.read_any().unwrap(), value);
//! ```

pub mod any;
pub mod rle;
mod value;

pub use any::{decode_any, encode_any, ReadAny, WriteAny};
pub use value::AnyValue;
pub use varpack_buffers::{is_float32, CodecError, Decoder, Encoder, MAX_SAFE_INTEGER};
