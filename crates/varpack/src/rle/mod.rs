//! Stateful run-length and diff codecs.
//!
//! Every encoder here keeps the last value (or diff) and a pending run count.
//! A `write` either extends the current run or flushes it and starts a new
//! one; decoders mirror that, serving cached values until the run is used up
//! and then decoding the next run header. Encoders and decoders must be used
//! in matching pairs:
//!
//! | Encoder | Run | Header | Count |
//! |---------|-----|--------|-------|
//! | [`RleEncoder`] | equal values | caller's value encoding | `varUint(count - 1)`, final run implicit |
//! | [`IntDiffEncoder`] | none | `varInt(value - previous)` | none |
//! | [`RleIntDiffEncoder`] | equal values | `varInt(value - previous)` | `varUint(count - 1)`, final run implicit |
//! | [`UintOptRleEncoder`] | equal values | `varInt(count == 1 ? v : -v)` | `varUint(count - 2)` if count > 1 |
//! | [`IncUintOptRleEncoder`] | ascending by 1 | same as above | same as above |
//! | [`IntDiffOptRleEncoder`] | equal diffs | `varInt(diff * 2 + (count > 1))` | `varUint(count - 2)` if count > 1 |
//!
//! Malformed input surfaces as the primitive [`CodecError`](varpack_buffers::CodecError)s.

mod decoder;
mod encoder;
mod string;

pub use decoder::{
    IncUintOptRleDecoder, IntDiffDecoder, IntDiffOptRleDecoder, RleDecoder, RleIntDiffDecoder,
    UintOptRleDecoder,
};
pub use encoder::{
    IncUintOptRleEncoder, IntDiffEncoder, IntDiffOptRleEncoder, RleEncoder, RleIntDiffEncoder,
    UintOptRleEncoder,
};
pub use string::{StringDecoder, StringEncoder, STRING_FRAGMENT_THRESHOLD};
