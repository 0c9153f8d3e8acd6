//! Self-describing "Any" encoding.
//!
//! Each value is one tag byte followed by a tag-specific payload:
//!
//! | Tag | Value | Payload |
//! |-----|-------|---------|
//! | 127 | undefined | none |
//! | 126 | null | none |
//! | 125 | integer, `\|v\| <= 2^31 - 1` | signed varint |
//! | 124 | float exact in single precision | 4-byte `f32` |
//! | 123 | other float | 8-byte `f64` |
//! | 122 | 64-bit integer | 8-byte big-endian |
//! | 121 | `false` | none |
//! | 120 | `true` | none |
//! | 119 | string | varint length + UTF-8 |
//! | 118 | object | varint count, then key string + value per entry |
//! | 117 | array | varint count, then each element |
//! | 116 | bytes | varint length + raw bytes |

pub mod constants;
mod decoder;
mod encoder;

pub use decoder::{decode_any, ReadAny};
pub use encoder::{encode_any, WriteAny};
