//! Read-only cursor over an encoded byte slice.

use std::str;

use crate::constants::{BIT7, BIT8, BITS6, BITS7, MAX_SAFE_INTEGER};
use crate::CodecError;

/// A binary decoder that reads from a borrowed byte slice.
///
/// The decoder never copies its input. Byte and string views it returns
/// borrow the source slice for `'a`, so they stay valid after the decoder
/// itself is dropped but can never outlive the data. Copying the decoder
/// (it is `Copy`) yields an independent cursor over the same bytes.
///
/// Every read is bounds-checked and fails with
/// [`CodecError::UnexpectedEndOfInput`] instead of reading past the end.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Creates a decoder that starts reading at `position`.
    ///
    /// A position past the end is kept as given; every read from it fails
    /// with [`CodecError::UnexpectedEndOfInput`].
    pub fn at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Independent cursor over the same bytes, starting at `position`.
    pub fn clone_at(&self, position: usize) -> Self {
        Self::at(self.data, position)
    }

    /// Current offset into the data.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Whether any unread bytes are left.
    pub fn has_content(&self) -> bool {
        self.position != self.data.len()
    }

    /// Returns a view of the next `length` bytes and advances past them.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], CodecError> {
        let data = self.data;
        let start = self.position;
        let bytes = start
            .checked_add(length)
            .and_then(|end| data.get(start..end))
            .ok_or(CodecError::UnexpectedEndOfInput)?;
        self.position += length;
        Ok(bytes)
    }

    /// Reads a varint length, then that many bytes as a view.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let length = self.read_var_uint()?;
        let length = usize::try_from(length).map_err(|_| CodecError::IntegerOutOfRange)?;
        self.read_bytes(length)
    }

    /// Returns a view of everything left and moves to the end.
    pub fn read_tail(&mut self) -> &'a [u8] {
        let tail = self.data.get(self.position..).unwrap_or(&[]);
        self.position = self.position.max(self.data.len());
        tail
    }

    /// Advances past `length` bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), CodecError> {
        self.read_bytes(length).map(|_| ())
    }

    /// Advances past one byte.
    pub fn skip8(&mut self) -> Result<(), CodecError> {
        self.skip(1)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads one byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(CodecError::UnexpectedEndOfInput)?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> Result<u32, CodecError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Reads one byte without advancing.
    pub fn peek_u8(&self) -> Result<u8, CodecError> {
        let mut probe = *self;
        probe.read_u8()
    }

    /// Reads a little-endian `u16` without advancing.
    pub fn peek_u16(&self) -> Result<u16, CodecError> {
        let mut probe = *self;
        probe.read_u16()
    }

    /// Reads a little-endian `u32` without advancing.
    pub fn peek_u32(&self) -> Result<u32, CodecError> {
        let mut probe = *self;
        probe.read_u32()
    }

    /// Reads an unsigned base-128 varint.
    ///
    /// Fails with [`CodecError::IntegerOutOfRange`] once the value would
    /// exceed [`MAX_SAFE_INTEGER`], and with
    /// [`CodecError::UnexpectedEndOfInput`] if the input stops while the
    /// continuation bit is still set.
    pub fn read_var_uint(&mut self) -> Result<u64, CodecError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            value = accumulate(value, byte & BITS7, shift)?;
            if byte < BIT8 {
                return Ok(value);
            }
            shift = shift.saturating_add(7);
        }
    }

    /// Reads a signed varint.
    ///
    /// Negative zero decodes to `0`; use
    /// [`read_var_int_parts`](Decoder::read_var_int_parts) to observe its sign.
    pub fn read_var_int(&mut self) -> Result<i64, CodecError> {
        let (negative, magnitude) = self.read_var_int_parts()?;
        // magnitude <= MAX_SAFE_INTEGER, so the cast is lossless
        let value = magnitude as i64;
        Ok(if negative { -value } else { value })
    }

    /// Reads a signed varint as `(negative, magnitude)`.
    pub fn read_var_int_parts(&mut self) -> Result<(bool, u64), CodecError> {
        let first = self.read_u8()?;
        let negative = first & BIT7 != 0;
        let mut magnitude = (first & BITS6) as u64;
        if first & BIT8 == 0 {
            return Ok((negative, magnitude));
        }
        let mut shift = 6u32;
        loop {
            let byte = self.read_u8()?;
            magnitude = accumulate(magnitude, byte & BITS7, shift)?;
            if byte < BIT8 {
                return Ok((negative, magnitude));
            }
            shift = shift.saturating_add(7);
        }
    }

    /// Decodes a varuint without moving the cursor.
    pub fn peek_var_uint(&self) -> Result<u64, CodecError> {
        let mut probe = *self;
        probe.read_var_uint()
    }

    /// Decodes a varint without moving the cursor.
    pub fn peek_var_int(&self) -> Result<i64, CodecError> {
        let mut probe = *self;
        probe.read_var_int()
    }

    /// Reads a length-prefixed UTF-8 string as a view into the input.
    pub fn read_var_string(&mut self) -> Result<&'a str, CodecError> {
        let bytes = self.read_var_bytes()?;
        str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Reads a big-endian IEEE-754 single.
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        self.read_array().map(f32::from_be_bytes)
    }

    /// Reads a big-endian IEEE-754 double.
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        self.read_array().map(f64::from_be_bytes)
    }

    /// Reads a big-endian `i64`.
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.read_array().map(u64::from_be_bytes)
    }
}

/// Adds a 7-bit group at bit offset `shift`, refusing to pass `MAX_SAFE_INTEGER`.
fn accumulate(value: u64, group: u8, shift: u32) -> Result<u64, CodecError> {
    if group == 0 {
        return Ok(value);
    }
    if shift >= 53 {
        return Err(CodecError::IntegerOutOfRange);
    }
    let value = value + ((group as u64) << shift);
    if value > MAX_SAFE_INTEGER {
        return Err(CodecError::IntegerOutOfRange);
    }
    Ok(value)
}
