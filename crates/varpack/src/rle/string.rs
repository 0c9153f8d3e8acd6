//! Concatenated string encoding.
//!
//! Many short strings are written as one concatenated string plus a
//! [`UintOptRleEncoder`] stream of their lengths, so decoding costs a single
//! UTF-8 validation instead of one per string. Lengths count UTF-16 code
//! units, which keeps the length stream identical to other implementations
//! of this format for text outside the Basic Multilingual Plane.

use varpack_buffers::{CodecError, Decoder, Encoder};

use super::{UintOptRleDecoder, UintOptRleEncoder};

/// Pending text is moved into the fragment list once it grows past this many
/// UTF-16 code units.
pub const STRING_FRAGMENT_THRESHOLD: usize = 19;

#[derive(Default)]
pub struct StringEncoder {
    fragments: Vec<String>,
    pending: String,
    pending_units: usize,
    lengths: UintOptRleEncoder,
}

impl StringEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, value: &str) {
        let units = value.encode_utf16().count();
        self.pending.push_str(value);
        self.pending_units += units;
        if self.pending_units > STRING_FRAGMENT_THRESHOLD {
            self.fragments.push(std::mem::take(&mut self.pending));
            self.pending_units = 0;
        }
        self.lengths.write(units as u64);
    }

    /// Writes the concatenated text followed by the length stream.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        if !self.pending.is_empty() {
            self.fragments.push(std::mem::take(&mut self.pending));
            self.pending_units = 0;
        }
        let mut encoder = Encoder::new();
        encoder.write_var_string(&self.fragments.concat());
        encoder.write_bytes(&self.lengths.to_bytes());
        encoder.to_bytes()
    }
}

/// Reads strings written by [`StringEncoder`] as views into the input.
pub struct StringDecoder<'a> {
    lengths: UintOptRleDecoder<'a>,
    text: &'a str,
    offset: usize,
}

impl<'a> StringDecoder<'a> {
    /// Reads the concatenated text up front; lengths are decoded lazily.
    pub fn new(data: &'a [u8]) -> Result<Self, CodecError> {
        let mut decoder = Decoder::new(data);
        let text = decoder.read_var_string()?;
        Ok(Self {
            lengths: UintOptRleDecoder::from_decoder(decoder),
            text,
            offset: 0,
        })
    }

    pub fn read(&mut self) -> Result<&'a str, CodecError> {
        let units = self.lengths.read()?;
        let rest = &self.text[self.offset..];
        let mut taken = 0u64;
        let mut end = rest.len();
        for (index, ch) in rest.char_indices() {
            if taken >= units {
                end = index;
                break;
            }
            taken += ch.len_utf16() as u64;
        }
        if taken < units {
            return Err(CodecError::UnexpectedEndOfInput);
        }
        if taken > units {
            // the length ends inside a surrogate pair
            return Err(CodecError::InvalidUtf8);
        }
        let value = &rest[..end];
        self.offset += end;
        Ok(value)
    }
}
