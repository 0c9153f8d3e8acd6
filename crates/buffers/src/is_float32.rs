//! Single-precision exactness check.

/// Returns `true` if `value` survives a round trip through `f32` unchanged.
///
/// Encoders use this to pick the 4-byte float encoding over the 8-byte one.
/// `NaN` never compares equal to itself, so it always reports `false`.
///
/// ```
/// use varpack_buffers::is_float32;
///
/// assert!(is_float32(0.25));
/// assert!(is_float32(f64::INFINITY));
/// assert!(!is_float32(0.1));
/// ```
pub fn is_float32(value: f64) -> bool {
    (value as f32) as f64 == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_float32() {
        assert!(is_float32(1.5));
        assert!(is_float32(-0.0));
        assert!(is_float32(16_777_216.0));
        assert!(!is_float32(16_777_217.0));
        assert!(!is_float32(1.1));
        assert!(!is_float32(f64::NAN));
        assert!(!is_float32(1e300));
    }
}
