//! `System.TimeSpan` and `System.DateTime` text forms.

use chrono::{NaiveDate, NaiveTime};

use crate::Result;

const TICKS_PER_SECOND: u64 = 10_000_000;
const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * 60;
const TICKS_PER_HOUR: u64 = TICKS_PER_MINUTE * 60;
const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * 24;

/// Mask of the tick bits in the `DateTime.ToBinary()` form; the top two bits hold the kind.
const DATE_TIME_TICKS_MASK: i64 = 0x3FFF_FFFF_FFFF_FFFF;
/// Ticks of `DateTime.MaxValue` (9999-12-31 23:59:59.9999999).
const DATE_TIME_MAX_TICKS: u64 = 3_155_378_975_999_999_999;

/// Format a `System.TimeSpan` with the constant ("c") format: `[-][d.]hh:mm:ss[.fffffff]`.
pub(crate) fn format_time_span(ticks: i64) -> String {
    let negative = ticks < 0;
    let ticks = ticks.unsigned_abs();

    let days = ticks / TICKS_PER_DAY;
    let hours = (ticks / TICKS_PER_HOUR) % 24;
    let minutes = (ticks / TICKS_PER_MINUTE) % 60;
    let seconds = (ticks / TICKS_PER_SECOND) % 60;
    let fraction = ticks % TICKS_PER_SECOND;

    let mut text = String::with_capacity(26);
    if negative {
        text.push('-');
    }
    if days > 0 {
        text.push_str(&format!("{days}."));
    }
    text.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if fraction > 0 {
        text.push_str(&format!(".{fraction:07}"));
    }

    text
}

/// Format a `System.DateTime` given in its `ToBinary()` form the way resx writers do.
///
/// - `DateTime.MinValue` prints as an empty string
/// - Midnight prints as the date alone, `yyyy-MM-dd`
/// - Anything else prints in the invariant general format, `MM/dd/yyyy HH:mm:ss`
///
/// The kind bits are ignored; ticks are printed as stored.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedPayload`] if the ticks lie beyond `DateTime.MaxValue`.
pub(crate) fn format_date_time(binary: i64) -> Result<String> {
    let ticks = (binary & DATE_TIME_TICKS_MASK) as u64;
    if ticks > DATE_TIME_MAX_TICKS {
        return Err(unsupported_payload!(
            "DateTime ticks {} exceed DateTime.MaxValue",
            ticks
        ));
    }
    if ticks == 0 {
        return Ok(String::new());
    }

    let days = ticks / TICKS_PER_DAY;
    let time_of_day = ticks % TICKS_PER_DAY;

    // Day 1 of the common era is 0001-01-01
    let date = i32::try_from(days + 1)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| unsupported_payload!("DateTime ticks {} are out of range", ticks))?;

    if time_of_day == 0 {
        return Ok(date.format("%Y-%m-%d").to_string());
    }

    let seconds = (time_of_day / TICKS_PER_SECOND) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .ok_or_else(|| unsupported_payload!("DateTime ticks {} are out of range", ticks))?;

    Ok(date.and_time(time).format("%m/%d/%Y %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks of 2024-03-15 00:00:00
    const MARCH_15_2024: i64 = 638_460_576_000_000_000;

    #[test]
    fn test_time_span_constant_format() {
        assert_eq!(format_time_span(0), "00:00:00");
        assert_eq!(format_time_span(90 * TICKS_PER_MINUTE as i64), "01:30:00");
        assert_eq!(
            format_time_span((TICKS_PER_DAY + 2 * TICKS_PER_HOUR + 5) as i64),
            "1.02:00:00.0000005"
        );
        assert_eq!(format_time_span(-(TICKS_PER_SECOND as i64) / 2), "-00:00:00.5000000");
    }

    #[test]
    fn test_time_span_extremes() {
        assert_eq!(format_time_span(i64::MAX), "10675199.02:48:05.4775807");
        assert_eq!(format_time_span(i64::MIN), "-10675199.02:48:05.4775808");
    }

    #[test]
    fn test_date_time_min_value() {
        assert_eq!(format_date_time(0).unwrap(), "");
    }

    #[test]
    fn test_date_time_midnight() {
        assert_eq!(format_date_time(MARCH_15_2024).unwrap(), "2024-03-15");
        assert_eq!(format_date_time(TICKS_PER_DAY as i64).unwrap(), "0001-01-02");
    }

    #[test]
    fn test_date_time_with_time_of_day() {
        let ticks = MARCH_15_2024 + (13 * TICKS_PER_HOUR + 5 * TICKS_PER_MINUTE + 9 * TICKS_PER_SECOND) as i64;
        assert_eq!(format_date_time(ticks).unwrap(), "03/15/2024 13:05:09");

        // Sub-second ticks still count as a time of day
        assert_eq!(format_date_time(MARCH_15_2024 + 1).unwrap(), "03/15/2024 00:00:00");
    }

    #[test]
    fn test_date_time_kind_bits_are_ignored() {
        let utc = MARCH_15_2024 | (1 << 62);
        assert_eq!(format_date_time(utc).unwrap(), "2024-03-15");
    }

    #[test]
    fn test_date_time_max_value() {
        assert_eq!(
            format_date_time(DATE_TIME_MAX_TICKS as i64).unwrap(),
            "12/31/9999 23:59:59"
        );
        assert!(matches!(
            format_date_time(DATE_TIME_MAX_TICKS as i64 + 1),
            Err(crate::Error::UnsupportedPayload(_))
        ));
    }
}
