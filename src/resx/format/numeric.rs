//! Invariant-culture number formatting.
//!
//! Integers print the same in Rust and .NET. Decimals and floating point values do not:
//! a .NET decimal remembers its scale, and the .NET round-trip format switches to
//! scientific notation at thresholds of its own. Both are reproduced here.

use crate::Result;

/// Largest scale a `System.Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;
/// Significant digits below which "R" never switches to scientific notation, for `Double`.
const DOUBLE_PRECISION: usize = 15;
/// Significant digits below which "R" never switches to scientific notation, for `Single`.
const SINGLE_PRECISION: usize = 7;

/// Format a `System.Decimal` given as its four `GetBits` words with the "G" format.
///
/// Trailing zeros covered by the scale are kept (`1.50` stays `1.50`). A negative zero
/// prints without its sign.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedPayload`] if the scale exceeds 28.
pub(crate) fn format_decimal(lo: i32, mid: i32, hi: i32, flags: i32) -> Result<String> {
    let flags = flags as u32;
    let scale = (flags >> 16) & 0xFF;
    if scale > MAX_DECIMAL_SCALE {
        return Err(unsupported_payload!("decimal scale {} exceeds {}", scale, MAX_DECIMAL_SCALE));
    }

    let mantissa = (u128::from(hi as u32) << 64) | (u128::from(mid as u32) << 32) | u128::from(lo as u32);
    let negative = flags & 0x8000_0000 != 0 && mantissa != 0;

    let digits = mantissa.to_string();
    let scale = scale as usize;

    let mut text = String::with_capacity(digits.len() + scale + 3);
    if negative {
        text.push('-');
    }

    if scale == 0 {
        text.push_str(&digits);
    } else if digits.len() > scale {
        let (integral, fraction) = digits.split_at(digits.len() - scale);
        text.push_str(integral);
        text.push('.');
        text.push_str(fraction);
    } else {
        text.push_str("0.");
        text.push_str(&"0".repeat(scale - digits.len()));
        text.push_str(&digits);
    }

    Ok(text)
}

/// Format a `System.Double` with the round-trip ("R") format.
///
/// Shortest round-trip digits and the 15 digit threshold follow .NET Core 3.0 and later;
/// .NET Framework's "R" can print a different digit string for some values.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return infinity(value.is_sign_negative());
    }
    if value == 0.0 {
        return zero(value.is_sign_negative());
    }

    format_round_trip(&format!("{value:e}"), DOUBLE_PRECISION)
}

/// Format a `System.Single` with the round-trip ("R") format.
///
/// Like [`format_double`], this follows .NET Core 3.0 and later, with a 7 digit threshold.
pub(crate) fn format_single(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return infinity(value.is_sign_negative());
    }
    if value == 0.0 {
        return zero(value.is_sign_negative());
    }

    format_round_trip(&format!("{value:e}"), SINGLE_PRECISION)
}

fn infinity(negative: bool) -> String {
    let text = if negative { "-Infinity" } else { "Infinity" };
    text.to_string()
}

fn zero(negative: bool) -> String {
    let text = if negative { "-0" } else { "0" };
    text.to_string()
}

/// Lay out the shortest round-trip digits of a finite, non-zero value the way .NET's
/// general format does.
///
/// `exponential` is Rust's `{:e}` rendering, which already carries the shortest digit
/// string that round-trips (`-1.2345e-7`).
fn format_round_trip(exponential: &str, precision: usize) -> String {
    let (negative, unsigned) = match exponential.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, exponential),
    };
    let (mantissa, exponent) = unsigned.split_once('e').unwrap_or((unsigned, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let digit_count = digits.len();
    let max_digits = digit_count.max(precision);

    // Position of the decimal point relative to the first digit
    let decimal_position = exponent + 1;

    let mut text = String::with_capacity(digit_count + 8);
    if negative {
        text.push('-');
    }

    let scientific = i64::from(decimal_position) > max_digits as i64 || decimal_position < -3;
    if scientific {
        text.push(char::from(digits[0]));
        if digit_count > 1 {
            text.push('.');
            text.extend(digits[1..].iter().copied().map(char::from));
        }
        text.push('E');
        text.push(if exponent < 0 { '-' } else { '+' });
        text.push_str(&format!("{:02}", exponent.unsigned_abs()));
        return text;
    }

    if decimal_position > 0 {
        let integral = decimal_position as usize;
        for index in 0..integral {
            text.push(digits.get(index).map_or('0', |digit| char::from(*digit)));
        }
        if digit_count > integral {
            text.push('.');
            text.extend(digits[integral..].iter().copied().map(char::from));
        }
    } else {
        text.push_str("0.");
        text.push_str(&"0".repeat(decimal_position.unsigned_abs() as usize));
        text.extend(digits.iter().copied().map(char::from));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(mantissa: i64, scale: u8, negative: bool) -> String {
        let lo = (mantissa & 0xFFFF_FFFF) as u32 as i32;
        let mid = ((mantissa >> 32) & 0xFFFF_FFFF) as u32 as i32;
        let sign = if negative { 0x8000_0000u32 } else { 0 };
        let flags = (sign | (u32::from(scale) << 16)) as i32;
        format_decimal(lo, mid, 0, flags).unwrap()
    }

    #[test]
    fn test_decimal_scale() {
        assert_eq!(decimal(3261, 3, false), "3.261");
        assert_eq!(decimal(150, 2, false), "1.50");
        assert_eq!(decimal(5, 3, true), "-0.005");
        assert_eq!(decimal(42, 0, false), "42");
        assert_eq!(decimal(0, 2, false), "0.00");
    }

    #[test]
    fn test_decimal_negative_zero() {
        assert_eq!(decimal(0, 0, true), "0");
        assert_eq!(decimal(0, 1, true), "0.0");
    }

    #[test]
    fn test_decimal_max_value() {
        // 79228162514264337593543950335
        assert_eq!(format_decimal(-1, -1, -1, 0).unwrap(), "79228162514264337593543950335");
        assert_eq!(
            format_decimal(-1, -1, -1, 28 << 16).unwrap(),
            "7.9228162514264337593543950335"
        );
    }

    #[test]
    fn test_decimal_invalid_scale() {
        assert!(matches!(
            format_decimal(1, 0, 0, 29 << 16),
            Err(crate::Error::UnsupportedPayload(_))
        ));
    }

    #[test]
    fn test_double_positional() {
        assert_eq!(format_double(1.5), "1.5");
        assert_eq!(format_double(-2.0), "-2");
        assert_eq!(format_double(0.1), "0.1");
        assert_eq!(format_double(123456.789), "123456.789");
        assert_eq!(format_double(0.0001), "0.0001");
        assert_eq!(format_double(1e14), "100000000000000");
        assert_eq!(format_double(1e15), "1E+15");
        assert_eq!(format_double(123456789012345.0), "123456789012345");
    }

    #[test]
    fn test_double_scientific() {
        assert_eq!(format_double(0.00001), "1E-05");
        assert_eq!(format_double(1.5e-10), "1.5E-10");
        assert_eq!(format_double(1e16), "1E+16");
        assert_eq!(format_double(f64::MAX), "1.7976931348623157E+308");
        assert_eq!(format_double(f64::EPSILON), "2.220446049250313E-16");
        assert_eq!(format_double(-4.9e-324), "-5E-324");
    }

    #[test]
    fn test_double_long_digit_strings() {
        // 17 significant digits raise the threshold above 15
        assert_eq!(format_double(0.30000000000000004), "0.30000000000000004");
        assert_eq!(format_double(12345678901234567.0), "12345678901234568");
        assert_eq!(format_double(1.2345678901234568e20), "1.2345678901234568E+20");
    }

    #[test]
    fn test_double_special_values() {
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::INFINITY), "Infinity");
        assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_double(0.0), "0");
        assert_eq!(format_double(-0.0), "-0");
    }

    #[test]
    fn test_single() {
        assert_eq!(format_single(1.1), "1.1");
        assert_eq!(format_single(3.4028235e38), "3.4028235E+38");
        assert_eq!(format_single(1_000_000.0), "1000000");
        assert_eq!(format_single(10_000_000.0), "1E+07");
        assert_eq!(format_single(16_777_216.0), "16777216");
        assert_eq!(format_single(0.00001), "1E-05");
        assert_eq!(format_single(-0.0), "-0");
    }
}
