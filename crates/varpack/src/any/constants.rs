//! Tag bytes of the self-describing Any format.
//!
//! Tags count down from 127. Values below [`TAG_BYTES`] are left to
//! formats layered on top and are never produced or accepted here.

pub const TAG_UNDEFINED: u8 = 127;
pub const TAG_NULL: u8 = 126;
/// Integer with magnitude up to `2^31 - 1`, as a signed varint.
pub const TAG_INTEGER: u8 = 125;
pub const TAG_FLOAT32: u8 = 124;
pub const TAG_FLOAT64: u8 = 123;
pub const TAG_BIGINT: u8 = 122;
pub const TAG_FALSE: u8 = 121;
pub const TAG_TRUE: u8 = 120;
pub const TAG_STRING: u8 = 119;
pub const TAG_OBJECT: u8 = 118;
pub const TAG_ARRAY: u8 = 117;
pub const TAG_BYTES: u8 = 116;

/// Largest magnitude written with [`TAG_INTEGER`].
pub const MAX_TAGGED_INTEGER: u64 = i32::MAX as u64;

/// Deepest array/object nesting [`ReadAny::read_any`](crate::ReadAny::read_any) accepts.
pub const MAX_DEPTH: usize = 512;
