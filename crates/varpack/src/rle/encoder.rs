//! Run-length and diff encoders.

use varpack_buffers::Encoder;

/// Basic run-length encoder over a caller-supplied value encoding.
///
/// Each run is written as the value followed, once the next run starts, by
/// `varUint(count - 1)`. The count of the final run is never written; the
/// decoder repeats the last value for as long as it is asked.
///
/// Encodes `[1, 1, 1, 7]` as `[1, 2, 7]`.
pub struct RleEncoder<T> {
    encoder: Encoder,
    writer: fn(&mut Encoder, &T),
    state: Option<T>,
    count: u64,
}

impl<T: PartialEq + Clone> RleEncoder<T> {
    pub fn new(writer: fn(&mut Encoder, &T)) -> Self {
        Self {
            encoder: Encoder::new(),
            writer,
            state: None,
            count: 0,
        }
    }

    pub fn write(&mut self, value: T) {
        if self.state.as_ref() == Some(&value) {
            self.count += 1;
            return;
        }
        if self.count > 0 {
            self.encoder.write_var_uint(self.count - 1);
        }
        self.count = 1;
        (self.writer)(&mut self.encoder, &value);
        self.state = Some(value);
    }

    pub fn len(&self) -> usize {
        self.encoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoder.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoder.to_bytes()
    }
}

/// Writes every value as the signed varint difference to its predecessor.
///
/// Encodes `[3, 1100, 1101, 1050, 0]` (start `0`) as `[3, 1097, 1, -51, -1050]`.
pub struct IntDiffEncoder {
    encoder: Encoder,
    state: i64,
}

impl IntDiffEncoder {
    pub fn new(start: i64) -> Self {
        Self {
            encoder: Encoder::new(),
            state: start,
        }
    }

    pub fn write(&mut self, value: i64) {
        self.encoder.write_var_int(value.wrapping_sub(self.state));
        self.state = value;
    }

    pub fn len(&self) -> usize {
        self.encoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoder.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoder.to_bytes()
    }
}

/// Diff encoding with runs of repeated values collapsed.
///
/// A run starts with `varInt(value - previous)`; when the next run starts the
/// finished one gets `varUint(count - 1)`. As with [`RleEncoder`] the last
/// count is left implicit.
///
/// Encodes `[1, 1, 1, 2, 3]` (start `0`) as `[1, 2, 1, 0, 1]`.
pub struct RleIntDiffEncoder {
    encoder: Encoder,
    state: i64,
    count: u64,
}

impl RleIntDiffEncoder {
    pub fn new(start: i64) -> Self {
        Self {
            encoder: Encoder::new(),
            state: start,
            count: 0,
        }
    }

    pub fn write(&mut self, value: i64) {
        if self.state == value && self.count > 0 {
            self.count += 1;
            return;
        }
        if self.count > 0 {
            self.encoder.write_var_uint(self.count - 1);
        }
        self.count = 1;
        self.encoder.write_var_int(value.wrapping_sub(self.state));
        self.state = value;
    }

    pub fn len(&self) -> usize {
        self.encoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoder.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoder.to_bytes()
    }
}

/// Writes a pending `(state, count)` run in the opt-RLE layout: the sign of
/// the varint says whether `varUint(count - 2)` follows.
fn flush_opt_run(encoder: &mut Encoder, state: u64, count: u64) {
    if count == 0 {
        return;
    }
    encoder.write_var_int_parts(count > 1, state);
    if count > 1 {
        encoder.write_var_uint(count - 2);
    }
}

/// Run-length encoder for unsigned integers that costs nothing extra for
/// values occurring once.
///
/// A single occurrence is written as `varInt(value)`; a run as
/// `varInt(-value)` followed by `varUint(count - 2)`. Zero uses the sign of
/// negative zero.
///
/// Encodes `[1, 2, 3, 3, 3]` as `[1, 2, -3, 1]`.
#[derive(Default)]
pub struct UintOptRleEncoder {
    encoder: Encoder,
    state: u64,
    count: u64,
}

impl UintOptRleEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, value: u64) {
        if self.state == value {
            self.count += 1;
        } else {
            flush_opt_run(&mut self.encoder, self.state, self.count);
            self.count = 1;
            self.state = value;
        }
    }

    /// Flushes the pending run and returns everything written so far.
    ///
    /// Writing may continue afterwards; a value equal to the last one then
    /// starts a new run.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        flush_opt_run(&mut self.encoder, self.state, self.count);
        self.count = 0;
        self.encoder.to_bytes()
    }
}

/// Like [`UintOptRleEncoder`], but a run is a sequence of consecutive
/// ascending integers rather than a repeated value.
///
/// Encodes `[7, 8, 9, 10]` as `[-7, 2]` and `[1, 3, 5]` as `[1, 3, 5]`.
#[derive(Default)]
pub struct IncUintOptRleEncoder {
    encoder: Encoder,
    state: u64,
    count: u64,
}

impl IncUintOptRleEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, value: u64) {
        if self.state.checked_add(self.count) == Some(value) {
            self.count += 1;
        } else {
            flush_opt_run(&mut self.encoder, self.state, self.count);
            self.count = 1;
            self.state = value;
        }
    }

    /// Flushes the pending run and returns everything written so far.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        flush_opt_run(&mut self.encoder, self.state, self.count);
        self.count = 0;
        self.encoder.to_bytes()
    }
}

/// Diff encoder that collapses runs of equal diffs.
///
/// Each run is written as `varInt(diff * 2 + flag)`, where the low bit `flag`
/// says whether `varUint(count - 2)` follows. Diffs must therefore fit in
/// 52 bits to stay decodable.
///
/// Encodes `[1, 2, 3, 2]` as `[3, 1, -2]` (diff 1 three times, then diff -1).
#[derive(Default)]
pub struct IntDiffOptRleEncoder {
    encoder: Encoder,
    state: i64,
    count: u64,
    diff: i64,
}

impl IntDiffOptRleEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, value: i64) {
        let diff = value.wrapping_sub(self.state);
        if self.diff == diff {
            self.count += 1;
        } else {
            self.flush();
            self.count = 1;
            self.diff = diff;
        }
        self.state = value;
    }

    fn flush(&mut self) {
        if self.count == 0 {
            return;
        }
        let flag = if self.count == 1 { 0 } else { 1 };
        self.encoder
            .write_var_int(self.diff.wrapping_mul(2).wrapping_add(flag));
        if self.count > 1 {
            self.encoder.write_var_uint(self.count - 2);
        }
    }

    /// Flushes the pending run and returns everything written so far.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        self.flush();
        self.count = 0;
        self.encoder.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rle_wire() {
        let mut e = RleEncoder::new(|e: &mut Encoder, v: &u8| e.write_u8(*v));
        for v in [1, 1, 1, 7] {
            e.write(v);
        }
        assert_eq!(e.to_bytes(), vec![1, 2, 7]);
    }

    #[test]
    fn test_int_diff_wire() {
        let mut e = IntDiffEncoder::new(0);
        for v in [3, 1100, 1101, 1050, 0] {
            e.write(v);
        }
        let mut expected = Encoder::new();
        for d in [3, 1097, 1, -51, -1050] {
            expected.write_var_int(d);
        }
        assert_eq!(e.to_bytes(), expected.to_bytes());
    }

    #[test]
    fn test_rle_int_diff_wire() {
        let mut e = RleIntDiffEncoder::new(0);
        for v in [1, 1, 1, 2, 3] {
            e.write(v);
        }
        assert_eq!(e.to_bytes(), vec![1, 2, 1, 0, 1]);
    }

    #[test]
    fn test_uint_opt_rle_wire() {
        let mut e = UintOptRleEncoder::new();
        for v in [1, 2, 3, 3, 3] {
            e.write(v);
        }
        assert_eq!(e.to_bytes(), vec![1, 2, 0x40 | 3, 1]);
    }

    #[test]
    fn test_uint_opt_rle_zero_run_uses_negative_zero() {
        let mut e = UintOptRleEncoder::new();
        e.write(0);
        e.write(0);
        assert_eq!(e.to_bytes(), vec![0x40, 0]);
    }

    #[test]
    fn test_inc_uint_opt_rle_wire() {
        let mut e = IncUintOptRleEncoder::new();
        for v in [7, 8, 9, 10] {
            e.write(v);
        }
        assert_eq!(e.to_bytes(), vec![0x40 | 7, 2]);

        let mut e = IncUintOptRleEncoder::new();
        for v in [1, 3, 5] {
            e.write(v);
        }
        assert_eq!(e.to_bytes(), vec![1, 3, 5]);
    }

    #[test]
    fn test_int_diff_opt_rle_wire() {
        let mut e = IntDiffOptRleEncoder::new();
        for v in [1, 2, 3, 2] {
            e.write(v);
        }
        assert_eq!(e.to_bytes(), vec![3, 1, 0x40 | 2]);
    }

    #[test]
    fn test_to_bytes_twice_does_not_duplicate_run() {
        let mut e = UintOptRleEncoder::new();
        e.write(5);
        e.write(5);
        let first = e.to_bytes();
        assert_eq!(e.to_bytes(), first);
    }
}
