//! Append-only binary encoder over a list of fixed-size chunks.

use tracing::trace;

use crate::constants::{BIT7, BIT8, BITS6, BITS7, DEFAULT_CHUNK_SIZE};

/// A binary encoder that writes into an auto-growing, chunked buffer.
///
/// Bytes go into the active chunk until it is full. A full chunk is retired
/// into the chunk list, where it is never touched again (except by the
/// backpatching [`set`](Encoder::set) family), and a chunk of twice the size
/// replaces it. Nothing is concatenated until [`to_bytes`](Encoder::to_bytes).
///
/// Fixed-width integers are little-endian; the 64-bit and floating point
/// fields, and [`write_u32_be`](Encoder::write_u32_be), are big-endian.
///
/// # Example
///
/// ```
/// use varpack_buffers::{Decoder, Encoder};
///
/// let mut encoder = Encoder::new();
/// encoder.write_var_uint(300);
/// encoder.write_var_string("hello");
/// let data = encoder.to_bytes();
///
/// let mut decoder = Decoder::new(&data);
/// assert_eq!(decoder.read_var_uint().unwrap(), 300);
/// assert_eq!(decoder.read_var_string().unwrap(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    chunks: Vec<Vec<u8>>,
    current: Vec<u8>,
    position: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Creates an encoder whose first chunk holds 100 bytes.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHUNK_SIZE)
    }

    /// Creates an encoder with a custom first-chunk size (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunks: Vec::new(),
            current: vec![0; capacity.max(1)],
            position: 0,
        }
    }

    /// Total number of bytes written so far.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum::<usize>() + self.position
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates every chunk into one contiguous byte vector.
    ///
    /// This copies the whole encoded content; keep it off hot paths.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out.extend_from_slice(&self.current[..self.position]);
        out
    }

    /// Moves the filled part of the active chunk into the chunk list and
    /// starts a fresh chunk of `next_size` bytes.
    fn retire(&mut self, next_size: usize) {
        let mut filled = std::mem::replace(&mut self.current, vec![0; next_size]);
        filled.truncate(self.position);
        trace!(retired = filled.len(), next_size, "encoder chunk retired");
        if !filled.is_empty() {
            self.chunks.push(filled);
        }
        self.position = 0;
    }

    /// Guarantees that the next `length` bytes fit in the active chunk.
    pub fn reserve(&mut self, length: usize) {
        let size = self.current.len();
        if size - self.position < length {
            self.retire(size.max(length) * 2);
        }
    }

    /// Appends one byte.
    #[inline]
    pub fn write(&mut self, byte: u8) {
        if self.position == self.current.len() {
            let next = self.current.len() * 2;
            self.retire(next);
        }
        self.current[self.position] = byte;
        self.position += 1;
    }

    /// Overwrites an already written byte at absolute `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    pub fn set(&mut self, mut position: usize, byte: u8) {
        for chunk in &mut self.chunks {
            if position < chunk.len() {
                chunk[position] = byte;
                return;
            }
            position -= chunk.len();
        }
        assert!(position < self.position, "set past the written length");
        self.current[position] = byte;
    }

    /// Appends raw bytes, splitting them across a chunk boundary if needed.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let size = self.current.len();
        let left = (size - self.position).min(bytes.len());
        self.current[self.position..self.position + left].copy_from_slice(&bytes[..left]);
        self.position += left;
        let rest = &bytes[left..];
        if !rest.is_empty() {
            self.retire((size * 2).max(rest.len()));
            self.current[..rest.len()].copy_from_slice(rest);
            self.position = rest.len();
        }
    }

    /// Reserves `length` bytes and returns them for in-place writing.
    pub fn write_on(&mut self, length: usize) -> &mut [u8] {
        self.reserve(length);
        let start = self.position;
        self.position += length;
        &mut self.current[start..start + length]
    }

    /// Appends the finalized content of another encoder.
    pub fn write_encoder(&mut self, other: &Encoder) {
        for chunk in &other.chunks {
            self.write_bytes(chunk);
        }
        self.write_bytes(&other.current[..other.position]);
    }

    /// Appends one byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.write(value);
    }

    /// Overwrites the byte at `position`.
    pub fn set_u8(&mut self, position: usize, value: u8) {
        self.set(position, value);
    }

    /// Appends a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Overwrites two bytes at `position` with a little-endian `u16`.
    pub fn set_u16(&mut self, position: usize, value: u16) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.set(position + i, byte);
        }
    }

    /// Appends a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Appends a big-endian `u32`.
    pub fn write_u32_be(&mut self, value: u32) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Overwrites four bytes at `position` with a little-endian `u32`.
    pub fn set_u32(&mut self, position: usize, value: u32) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.set(position + i, byte);
        }
    }

    /// Writes an unsigned base-128 varint: 7 data bits per byte, high bit
    /// set while more bytes follow.
    pub fn write_var_uint(&mut self, mut value: u64) {
        while value > BITS7 as u64 {
            self.write(BIT8 | (value as u8 & BITS7));
            value >>= 7;
        }
        self.write(value as u8);
    }

    /// Writes a signed varint.
    pub fn write_var_int(&mut self, value: i64) {
        self.write_var_int_parts(value < 0, value.unsigned_abs());
    }

    /// Writes a signed varint from an explicit sign and magnitude.
    ///
    /// The first byte carries the continuation flag (bit 7), the sign flag
    /// (bit 6) and the 6 low magnitude bits; later bytes follow the
    /// [`write_var_uint`](Encoder::write_var_uint) layout. Passing
    /// `negative = true` with a zero magnitude encodes negative zero.
    pub fn write_var_int_parts(&mut self, negative: bool, mut magnitude: u64) {
        let more = if magnitude > BITS6 as u64 { BIT8 } else { 0 };
        let sign = if negative { BIT7 } else { 0 };
        self.write(more | sign | (magnitude as u8 & BITS6));
        magnitude >>= 6;
        while magnitude > 0 {
            let more = if magnitude > BITS7 as u64 { BIT8 } else { 0 };
            self.write(more | (magnitude as u8 & BITS7));
            magnitude >>= 7;
        }
    }

    /// Writes a varint length followed by the bytes themselves.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_var_uint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    /// Writes a string as length-prefixed UTF-8.
    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    /// Appends a big-endian IEEE-754 single.
    pub fn write_f32(&mut self, value: f32) {
        self.write_on(4).copy_from_slice(&value.to_be_bytes());
    }

    /// Appends a big-endian IEEE-754 double.
    pub fn write_f64(&mut self, value: f64) {
        self.write_on(8).copy_from_slice(&value.to_be_bytes());
    }

    /// Appends a big-endian `i64`.
    pub fn write_i64(&mut self, value: i64) {
        self.write_on(8).copy_from_slice(&value.to_be_bytes());
    }

    /// Appends a big-endian `u64`.
    pub fn write_u64(&mut self, value: u64) {
        self.write_on(8).copy_from_slice(&value.to_be_bytes());
    }
}
