//! Run-length and diff decoders.

use tracing::debug;
use varpack_buffers::{CodecError, Decoder};

/// Runs `read`, logging a failure with the position the read started at.
fn logged<'a, T>(
    decoder: &mut Decoder<'a>,
    read: impl FnOnce(&mut Decoder<'a>) -> Result<T, CodecError>,
) -> Result<T, CodecError> {
    let start = decoder.position();
    read(decoder).map_err(|err| {
        debug!(position = start, %err, "run header decode failed");
        err
    })
}

/// Remaining reads of the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Left(u64),
    /// Final run of a stream whose count was never written.
    Endless,
}

impl Run {
    fn is_exhausted(self) -> bool {
        self == Run::Left(0)
    }

    fn consume(&mut self) {
        if let Run::Left(n) = self {
            *n -= 1;
        }
    }
}

/// Reads a stream produced by [`RleEncoder`](super::RleEncoder).
pub struct RleDecoder<'a, T> {
    decoder: Decoder<'a>,
    reader: fn(&mut Decoder<'a>) -> Result<T, CodecError>,
    state: Option<T>,
    run: Run,
}

impl<'a, T: Clone> RleDecoder<'a, T> {
    pub fn new(data: &'a [u8], reader: fn(&mut Decoder<'a>) -> Result<T, CodecError>) -> Self {
        Self {
            decoder: Decoder::new(data),
            reader,
            state: None,
            run: Run::Left(0),
        }
    }

    pub fn read(&mut self) -> Result<T, CodecError> {
        if self.run.is_exhausted() {
            let value = logged(&mut self.decoder, self.reader)?;
            self.run = read_trailing_count(&mut self.decoder)?;
            self.state = Some(value);
        }
        self.run.consume();
        self.state.clone().ok_or(CodecError::UnexpectedEndOfInput)
    }

    pub fn has_content(&self) -> bool {
        self.decoder.has_content()
    }
}

/// Count after a basic RLE run header: `varUint(count - 1)`, or endless if
/// the stream stops right after the header.
fn read_trailing_count(decoder: &mut Decoder<'_>) -> Result<Run, CodecError> {
    if !decoder.has_content() {
        return Ok(Run::Endless);
    }
    let count = logged(decoder, Decoder::read_var_uint)?;
    Ok(Run::Left(count + 1))
}

/// Reads a stream produced by [`IntDiffEncoder`](super::IntDiffEncoder).
pub struct IntDiffDecoder<'a> {
    decoder: Decoder<'a>,
    state: i64,
}

impl<'a> IntDiffDecoder<'a> {
    pub fn new(data: &'a [u8], start: i64) -> Self {
        Self {
            decoder: Decoder::new(data),
            state: start,
        }
    }

    pub fn read(&mut self) -> Result<i64, CodecError> {
        let diff = logged(&mut self.decoder, Decoder::read_var_int)?;
        self.state = apply_diff(self.state, diff)?;
        Ok(self.state)
    }

    pub fn has_content(&self) -> bool {
        self.decoder.has_content()
    }
}

fn apply_diff(state: i64, diff: i64) -> Result<i64, CodecError> {
    state.checked_add(diff).ok_or(CodecError::IntegerOutOfRange)
}

/// Reads a stream produced by [`RleIntDiffEncoder`](super::RleIntDiffEncoder).
pub struct RleIntDiffDecoder<'a> {
    decoder: Decoder<'a>,
    state: i64,
    run: Run,
}

impl<'a> RleIntDiffDecoder<'a> {
    pub fn new(data: &'a [u8], start: i64) -> Self {
        Self {
            decoder: Decoder::new(data),
            state: start,
            run: Run::Left(0),
        }
    }

    pub fn read(&mut self) -> Result<i64, CodecError> {
        if self.run.is_exhausted() {
            let diff = logged(&mut self.decoder, Decoder::read_var_int)?;
            self.state = apply_diff(self.state, diff)?;
            self.run = read_trailing_count(&mut self.decoder)?;
        }
        self.run.consume();
        Ok(self.state)
    }

    pub fn has_content(&self) -> bool {
        self.decoder.has_content()
    }
}

/// Reads an opt-RLE run header: a varint whose sign says whether a
/// `varUint(count - 2)` follows. Returns `(value, count)`.
fn read_opt_run(decoder: &mut Decoder<'_>) -> Result<(u64, u64), CodecError> {
    let (negative, value) = logged(decoder, Decoder::read_var_int_parts)?;
    if !negative {
        return Ok((value, 1));
    }
    let count = logged(decoder, Decoder::read_var_uint)?;
    Ok((value, count + 2))
}

/// Reads a stream produced by [`UintOptRleEncoder`](super::UintOptRleEncoder).
pub struct UintOptRleDecoder<'a> {
    decoder: Decoder<'a>,
    state: u64,
    count: u64,
}

impl<'a> UintOptRleDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_decoder(Decoder::new(data))
    }

    /// Continues reading from an existing cursor position.
    pub fn from_decoder(decoder: Decoder<'a>) -> Self {
        Self {
            decoder,
            state: 0,
            count: 0,
        }
    }

    pub fn read(&mut self) -> Result<u64, CodecError> {
        if self.count == 0 {
            (self.state, self.count) = read_opt_run(&mut self.decoder)?;
        }
        self.count -= 1;
        Ok(self.state)
    }

    pub fn has_content(&self) -> bool {
        self.count > 0 || self.decoder.has_content()
    }
}

/// Reads a stream produced by [`IncUintOptRleEncoder`](super::IncUintOptRleEncoder).
pub struct IncUintOptRleDecoder<'a> {
    decoder: Decoder<'a>,
    state: u64,
    count: u64,
}

impl<'a> IncUintOptRleDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            decoder: Decoder::new(data),
            state: 0,
            count: 0,
        }
    }

    pub fn read(&mut self) -> Result<u64, CodecError> {
        if self.count == 0 {
            (self.state, self.count) = read_opt_run(&mut self.decoder)?;
        }
        self.count -= 1;
        let value = self.state;
        self.state += 1;
        Ok(value)
    }

    pub fn has_content(&self) -> bool {
        self.count > 0 || self.decoder.has_content()
    }
}

/// Reads a stream produced by [`IntDiffOptRleEncoder`](super::IntDiffOptRleEncoder).
pub struct IntDiffOptRleDecoder<'a> {
    decoder: Decoder<'a>,
    state: i64,
    count: u64,
    diff: i64,
}

impl<'a> IntDiffOptRleDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            decoder: Decoder::new(data),
            state: 0,
            count: 0,
            diff: 0,
        }
    }

    pub fn read(&mut self) -> Result<i64, CodecError> {
        if self.count == 0 {
            let header = logged(&mut self.decoder, Decoder::read_var_int)?;
            // arithmetic shift floors, so odd negative headers round down
            self.diff = header >> 1;
            self.count = if header & 1 == 1 {
                logged(&mut self.decoder, Decoder::read_var_uint)? + 2
            } else {
                1
            };
        }
        self.state = apply_diff(self.state, self.diff)?;
        self.count -= 1;
        Ok(self.state)
    }

    pub fn has_content(&self) -> bool {
        self.count > 0 || self.decoder.has_content()
    }
}
