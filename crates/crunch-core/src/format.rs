//! Text rendering and lenient parsing of parameter values.
//!
//! # Rounding
//!
//! [`format_fixed`] widens the value to `f64`, rounds **half away from zero**
//! at the requested number of fractional digits, then renders fixed-point.
//! Rounding works on the widened binary value, so `12.345_f32` (stored as
//! `12.3450002...`) renders as `"12.35"` and an exact tie such as `0.125`
//! renders as `"0.13"`. A result that rounds to zero is rendered without a
//! sign.
//!
//! # Parsing
//!
//! [`parse_leading_float`] reads the longest numeric prefix after leading
//! whitespace, so unit suffixes typed by users (`"12.5 dB"`) are ignored.
//! Text without a numeric prefix yields `None`.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Beyond this many digits the `f64` scale step loses more than it gains.
const MAX_ROUNDED_PRECISION: usize = 12;

/// Renders `value` with exactly `precision` fractional digits.
///
/// # Example
///
/// ```rust
/// use crunch_core::format_fixed;
///
/// assert_eq!(format_fixed(12.345, 2), "12.35");
/// assert_eq!(format_fixed(4.0, 0), "4");
/// assert_eq!(format_fixed(-0.5, 0), "-1");
/// ```
pub fn format_fixed(value: f32, precision: usize) -> String {
    let widened = f64::from(value);
    if !widened.is_finite() {
        return format!("{value}");
    }

    let mut rounded = widened;
    if precision <= MAX_ROUNDED_PRECISION {
        let scale = libm::pow(10.0, precision as f64);
        let scaled = widened * scale;
        if scaled.is_finite() {
            rounded = libm::round(scaled) / scale;
        }
    }
    if rounded == 0.0 {
        rounded = 0.0;
    }

    format!("{rounded:.precision$}")
}

/// Parses the leading decimal number of `text`.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent. Anything after the number is ignored.
///
/// # Example
///
/// ```rust
/// use crunch_core::parse_leading_float;
///
/// assert_eq!(parse_leading_float("  -3.5 dB"), Some(-3.5));
/// assert_eq!(parse_leading_float("1e2x"), Some(100.0));
/// assert_eq!(parse_leading_float("abc"), None);
/// ```
pub fn parse_leading_float(text: &str) -> Option<f32> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f32>().ok()
}
