//! String to typed value conversions used by the typed accessors.
//!
//! Each function takes an already resolved value and the key it belongs to
//! (for error reporting). An empty resolved value means "absent" and maps to
//! `None` (or an empty list) rather than a conversion failure.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};

/// Splits on `separator`. An empty separator splits after each character.
pub fn to_strings(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return value.chars().map(String::from).collect();
    }
    value.split(separator).map(str::to_string).collect()
}

pub fn to_int(key: &str, value: &str) -> Result<Option<i64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| Error::conversion(key, value, "int"))
}

pub fn to_float(key: &str, value: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::conversion(key, value, "float"))
}

/// Accepts `t, true, y, yes, on, 1` and `f, false, n, no, off, 0`.
/// Matching is case-sensitive.
pub fn to_bool(key: &str, value: &str) -> Result<Option<bool>> {
    match value {
        "" => Ok(None),
        "t" | "true" | "y" | "yes" | "on" | "1" => Ok(Some(true)),
        "f" | "false" | "n" | "no" | "off" | "0" => Ok(Some(false)),
        _ => Err(Error::conversion(key, value, "bool")),
    }
}

pub fn to_duration(key: &str, value: &str) -> Result<Option<Duration>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_duration(value)
        .map(Some)
        .ok_or_else(|| Error::conversion(key, value, "duration"))
}

/// Parses a timestamp. An empty `format` means RFC 3339; otherwise `format`
/// is a chrono strftime pattern. Patterns without an offset are read as UTC.
pub fn to_time(key: &str, value: &str, format: &str) -> Result<Option<DateTime<FixedOffset>>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_time(value, format)
        .map(Some)
        .ok_or_else(|| Error::conversion(key, value, "time"))
}

fn parse_time(value: &str, format: &str) -> Option<DateTime<FixedOffset>> {
    if format.is_empty() {
        return DateTime::parse_from_rfc3339(value).ok();
    }
    if let Ok(t) = DateTime::parse_from_str(value, format) {
        return Some(t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(value, format) {
        return Some(t.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(value, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().fixed_offset())
}

/// Nanoseconds per unit, longest suffixes first so `ms` wins over `m`.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

/// Fraction digits past this point are below nanosecond precision for every
/// unit and are read but ignored.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses durations such as `300ms`, `-1.5h` or `2h45m`. Every number needs
/// a unit except the literal `0`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let (negative, mut rest) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Some(Duration::zero());
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let whole = &rest[..int_len];
        rest = &rest[int_len..];

        let mut frac = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            frac = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }
        if whole.is_empty() && frac.is_empty() {
            return None;
        }

        let (suffix, unit) = UNITS.iter().find(|(suffix, _)| rest.starts_with(suffix))?;
        rest = &rest[suffix.len()..];

        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut nanos = whole.checked_mul(*unit)?;
        if !frac.is_empty() {
            let frac = &frac[..frac.len().min(MAX_FRACTION_DIGITS)];
            let scale = 10u128.checked_pow(u32::try_from(frac.len()).ok()?)?;
            let frac: u128 = frac.parse().ok()?;
            nanos = nanos.checked_add(frac.checked_mul(*unit)? / scale)?;
        }
        total = total.checked_add(nanos)?;
    }

    let magnitude = i128::try_from(total).ok()?;
    let nanos = i64::try_from(if negative { -magnitude } else { magnitude }).ok()?;
    Some(Duration::nanoseconds(nanos))
}
