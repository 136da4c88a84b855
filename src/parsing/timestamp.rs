//! Timestamp recognition.
//!
//! Two families live here:
//!
//! - [`parse_timestamp`] recognizes the wall-clock prefix of an exported
//!   transcript line (`15/03/24, 14:30 - ...`). Four layouts are tried in a
//!   fixed order and the first one that matches *and* forms a real calendar
//!   date wins.
//! - [`parse_iso8601`] reads the ISO-8601 timestamps of the structured
//!   formats and converts offset-carrying instants to wall-clock time.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use regex::{Captures, Regex};

use crate::config::TimeZoneSetting;

/// Field order of a timestamp layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayMonthYear,
    YearMonthDay,
}

/// A line-prefix layout.
///
/// Capture groups are always: three date fields, hour, minute, optional second.
struct Layout {
    order: FieldOrder,
    regex: Regex,
}

impl Layout {
    fn new(order: FieldOrder, pattern: &str) -> Self {
        Self {
            order,
            regex: Regex::new(pattern).expect("timestamp pattern is valid"),
        }
    }
}

static LAYOUTS: LazyLock<[Layout; 4]> = LazyLock::new(|| {
    [
        // 15/03/24, 14:30
        Layout::new(
            FieldOrder::DayMonthYear,
            r"^([0-9]{2})/([0-9]{2})/([0-9]{2,4}),?\s+([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?",
        ),
        // 15-03-2024 14:30:05
        Layout::new(
            FieldOrder::DayMonthYear,
            r"^([0-9]{2})-([0-9]{2})-([0-9]{2,4}),?\s+([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?",
        ),
        // 2024-03-15 14:30
        Layout::new(
            FieldOrder::YearMonthDay,
            r"^([0-9]{4})-([0-9]{2})-([0-9]{2}),?\s+([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?",
        ),
        // [15/03/24, 14:30:05]
        Layout::new(
            FieldOrder::DayMonthYear,
            r"^\[([0-9]{2})/([0-9]{2})/([0-9]{2,4}),?\s+([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?\]",
        ),
    ]
});

fn field(caps: &Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn build(caps: &Captures<'_>, order: FieldOrder) -> Option<NaiveDateTime> {
    let (a, b, c) = (field(caps, 1)?, field(caps, 2)?, field(caps, 3)?);
    let (year, month, day) = match order {
        FieldOrder::DayMonthYear => {
            let year = if c < 100 { 2000 + c } else { c };
            (year, b, a)
        }
        FieldOrder::YearMonthDay => (a, b, c),
    };
    let hour = field(caps, 4)?;
    let minute = field(caps, 5)?;
    let second = caps.get(6).map_or(Some(0), |m| m.as_str().parse().ok())?;

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?.and_hms_opt(hour, minute, second)
}

/// Parses a timestamp prefix and returns it with the byte length it occupies.
pub(crate) fn parse_timestamp_prefix(line: &str) -> Option<(NaiveDateTime, usize)> {
    LAYOUTS.iter().find_map(|layout| {
        let caps = layout.regex.captures(line)?;
        let whole = caps.get(0)?;
        build(&caps, layout.order).map(|ts| (ts, whole.end()))
    })
}

/// Parses the timestamp at the start of a transcript line.
///
/// Two-digit years are read as `20YY`. Returns `None` when no layout yields a
/// valid date and time; out-of-range values never roll over.
///
/// # Example
///
/// ```rust
/// use chatpulse::parsing::parse_timestamp;
///
/// let ts = parse_timestamp("15/03/24, 14:30 - Ana: Olá").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-15 14:30:00");
///
/// assert!(parse_timestamp("31/02/24, 10:00 - Ana: ?").is_none());
/// assert!(parse_timestamp("continuação da mensagem").is_none());
/// ```
pub fn parse_timestamp(line: &str) -> Option<NaiveDateTime> {
    parse_timestamp_prefix(line).map(|(ts, _)| ts)
}

/// Parses an ISO-8601 timestamp from a structured input.
///
/// - With an offset or `Z`: converted to wall-clock time in `zone`.
/// - Without an offset (`2024-03-15T14:30[:00[.000]]`): taken as wall-clock.
/// - Date only: midnight UTC, converted to `zone`.
///
/// Fractional seconds are truncated.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::TimeZoneSetting;
/// use chatpulse::parsing::parse_iso8601;
///
/// let utc = TimeZoneSetting::Utc;
/// let ts = parse_iso8601("2024-01-01T10:00:00+01:00", utc).unwrap();
/// assert_eq!(ts.to_string(), "2024-01-01 09:00:00");
///
/// let naive = parse_iso8601("2024-01-01T10:00:00", utc).unwrap();
/// assert_eq!(naive.to_string(), "2024-01-01 10:00:00");
///
/// assert!(parse_iso8601("yesterday", utc).is_none());
/// ```
pub fn parse_iso8601(input: &str, zone: TimeZoneSetting) -> Option<NaiveDateTime> {
    let input = input.trim();

    let parsed = if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        Some(zone.to_wall_clock(instant))
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        Some(naive)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        Some(naive)
    } else if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .map(|midnight| zone.to_wall_clock(midnight.and_utc().fixed_offset()))
    } else {
        None
    };

    parsed.and_then(|ts| ts.with_nanosecond(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_slash_two_digit_year() {
        assert_eq!(
            parse_timestamp("15/03/24, 14:30 - Ana: Olá"),
            Some(at(2024, 3, 15, 14, 30, 0))
        );
    }

    #[test]
    fn test_slash_four_digit_year_with_seconds() {
        assert_eq!(
            parse_timestamp("01/12/2023 9:05:07 - x"),
            Some(at(2023, 12, 1, 9, 5, 7))
        );
    }

    #[test]
    fn test_dash_layout() {
        assert_eq!(
            parse_timestamp("15-03-2024, 08:00 - Rui: bom dia"),
            Some(at(2024, 3, 15, 8, 0, 0))
        );
    }

    #[test]
    fn test_iso_order_layout() {
        assert_eq!(
            parse_timestamp("2024-03-15 14:30:59 - Ana: ok"),
            Some(at(2024, 3, 15, 14, 30, 59))
        );
    }

    #[test]
    fn test_bracketed_layout() {
        assert_eq!(
            parse_timestamp("[15/03/24, 14:30:05] Ana: Olá"),
            Some(at(2024, 3, 15, 14, 30, 5))
        );
    }

    #[test]
    fn test_invalid_calendar_values_rejected() {
        assert!(parse_timestamp("31/02/24, 10:00 - Ana: x").is_none());
        assert!(parse_timestamp("15/13/24, 10:00 - Ana: x").is_none());
        assert!(parse_timestamp("15/03/24, 25:00 - Ana: x").is_none());
        assert!(parse_timestamp("15/03/24, 10:61 - Ana: x").is_none());
    }

    #[test]
    fn test_non_timestamp_lines() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("just a continuation line").is_none());
        assert!(parse_timestamp("1/3/24, 10:00 - Ana: x").is_none());
    }

    #[test]
    fn test_prefix_length() {
        let line = "15/03/24, 14:30 - Ana: Olá";
        let (_, end) = parse_timestamp_prefix(line).unwrap();
        assert_eq!(&line[end..], " - Ana: Olá");

        let bracketed = "[15/03/24, 14:30] - x";
        let (_, end) = parse_timestamp_prefix(bracketed).unwrap();
        assert_eq!(&bracketed[end..], " - x");
    }

    #[test]
    fn test_iso8601_offset_and_z() {
        let utc = TimeZoneSetting::Utc;
        assert_eq!(
            parse_iso8601("2024-01-01T10:00:00Z", utc),
            Some(at(2024, 1, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_iso8601("2024-01-01T10:00:00.250-03:00", utc),
            Some(at(2024, 1, 1, 13, 0, 0))
        );
    }

    #[test]
    fn test_iso8601_naive_is_wall_clock() {
        let zone = TimeZoneSetting::Fixed {
            offset_seconds: 7200,
        };
        assert_eq!(
            parse_iso8601("2024-01-01T10:00:00", zone),
            Some(at(2024, 1, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_iso8601("2024-01-01T10:00", zone),
            Some(at(2024, 1, 1, 10, 0, 0))
        );
    }

    #[test]
    fn test_iso8601_date_only() {
        let zone = TimeZoneSetting::Fixed {
            offset_seconds: -3600,
        };
        assert_eq!(
            parse_iso8601("2024-01-02", zone),
            Some(at(2024, 1, 1, 23, 0, 0))
        );
    }

    #[test]
    fn test_iso8601_rejects_garbage() {
        let utc = TimeZoneSetting::Utc;
        assert!(parse_iso8601("", utc).is_none());
        assert!(parse_iso8601("15/03/24 10:00", utc).is_none());
        assert!(parse_iso8601("2024-02-30T10:00:00Z", utc).is_none());
    }
}
