//! Conversions from raw driver text to Rust values.
//!
//! Most DBMS client libraries hand result columns back as text. These
//! helpers give drivers one consistent way to turn that text into rich
//! values, including the corner cases the servers actually emit:
//! `Infinity`/`NaN` floats, exponent-form decimals, `BC` dates and
//! truncated UTC offsets such as `+10`.

#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::TypeError;

/// Parse a base-10 integer.
pub fn parse_int(s: &str) -> Result<i64, TypeError> {
    s.trim()
        .parse()
        .map_err(|_| TypeError::invalid("integer", s))
}

/// Parse a float, accepting `Infinity`, `-Infinity` and `NaN`.
pub fn parse_float(s: &str) -> Result<f64, TypeError> {
    match s.trim() {
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        other => other.parse().map_err(|_| TypeError::invalid("float", s)),
    }
}

/// Parse an exact decimal, in plain (`1.245`) or exponent (`1E-2`) form.
#[cfg(feature = "decimal")]
pub fn parse_decimal(s: &str) -> Result<rust_decimal::Decimal, TypeError> {
    use std::str::FromStr;

    let trimmed = s.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        rust_decimal::Decimal::from_scientific(trimmed)
    } else {
        rust_decimal::Decimal::from_str(trimmed)
    };
    parsed.map_err(|_| TypeError::invalid("decimal", s))
}

/// Interpret a boolean column value (`t`, `true`, `f`, `false`).
#[must_use]
pub fn parse_bool(s: &str) -> bool {
    matches!(s.as_bytes().first(), Some(b't' | b'T'))
}

/// Parse a `YYYY-MM-DD` date, optionally suffixed with ` BC`.
///
/// Year `n BC` maps to the proleptic Gregorian year `1 - n`, so
/// `431-09-22 BC` is year `-430`.
#[cfg(feature = "chrono")]
pub fn parse_date(s: &str) -> Result<NaiveDate, TypeError> {
    let (body, bc) = split_era(s.trim());

    let mut parts = body.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TypeError::invalid("date", s));
    };

    let year: i32 = y.parse().map_err(|_| TypeError::invalid("date", s))?;
    let month: u32 = m.parse().map_err(|_| TypeError::invalid("date", s))?;
    let day: u32 = d.parse().map_err(|_| TypeError::invalid("date", s))?;
    let year = if bc { 1 - year } else { year };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| TypeError::OutOfRange {
        expected: "date",
        input: s.to_string(),
    })
}

/// Parse a date and time that carries its own UTC offset.
///
/// The date and time may be separated by a space or `T`, and the offset
/// may be written `+10`, `+1000`, `+10:00` or `Z`, with or without a
/// preceding space. A trailing ` BC` works as in [`parse_date`].
#[cfg(feature = "chrono")]
pub fn parse_date_time_with_zone(s: &str) -> Result<DateTime<FixedOffset>, TypeError> {
    let (body, bc) = split_era(s.trim());
    let (body, offset) = split_offset(body).ok_or_else(|| TypeError::invalid("date-time", s))?;
    let naive = parse_naive_date_time(body, bc).ok_or_else(|| TypeError::invalid("date-time", s))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TypeError::AmbiguousLocalTime(s.to_string()))
}

/// Parse a date and time without an offset, in the system time zone.
#[cfg(feature = "chrono")]
pub fn parse_date_time_without_zone(s: &str) -> Result<DateTime<FixedOffset>, TypeError> {
    let (body, bc) = split_era(s.trim());
    let naive = parse_naive_date_time(body, bc).ok_or_else(|| TypeError::invalid("date-time", s))?;

    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| TypeError::AmbiguousLocalTime(s.to_string()))
}

/// Get the UTC offset of the local system, formatted like `+10:00`.
///
/// Drivers should use this to tell the DBMS the client's time zone.
#[cfg(feature = "chrono")]
#[must_use]
pub fn system_time_zone() -> String {
    Local::now().offset().to_string()
}

/// Strip a trailing ` BC` or ` AD` era marker.
#[cfg(feature = "chrono")]
fn split_era(s: &str) -> (&str, bool) {
    match s.strip_suffix(" BC") {
        Some(body) => (body, true),
        None => (s.strip_suffix(" AD").unwrap_or(s), false),
    }
}

#[cfg(feature = "chrono")]
fn parse_naive_date_time(s: &str, bc: bool) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    let naive = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())?;
    if bc { naive.with_year(1 - naive.year()) } else { Some(naive) }
}

/// Split a trailing UTC offset off a date-time string.
#[cfg(feature = "chrono")]
fn split_offset(s: &str) -> Option<(&str, FixedOffset)> {
    if let Some(body) = s.strip_suffix('Z').or_else(|| s.strip_suffix(" UTC")) {
        return Some((body.trim_end(), FixedOffset::east_opt(0)?));
    }

    // Only look for a sign after the date part, whose hyphens are not offsets.
    let time_start = s.find([' ', 'T'])?;
    let sign_at = time_start + s[time_start..].rfind(['+', '-'])?;
    let (body, offset) = s.split_at(sign_at);

    let negative = offset.starts_with('-');
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };

    let seconds = hours * 3600 + minutes * 60;
    let offset = if negative {
        FixedOffset::west_opt(seconds)?
    } else {
        FixedOffset::east_opt(seconds)?
    };

    Some((body.trim_end(), offset))
}
