use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer};
use tracing::warn;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Accepted layouts for purchase / delivery timestamps, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a dataset timestamp into a naive (zone-less) [`NaiveDateTime`].
///
/// The exported dataset carries local wall-clock times without an offset,
/// so no timezone conversion is attempted. A bare `YYYY-MM-DD` date is
/// interpreted as midnight. Returns `None` for empty or unrecognised input.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Some(date) = parse_date(s) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    warn!("could not parse timestamp \"{}\"", s);
    None
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Whole days from `earlier` to `later` (negative when reversed).
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Format a date the way the dashboard labels its axes and picker.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ── Serde helpers for CSV columns ─────────────────────────────────────────────

/// Deserialise a required timestamp column.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp format: {raw:?}")))
}

/// Deserialise a nullable timestamp column; an empty cell is `None`.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp format: {s:?}"))),
    }
}

/// Deserialise a nullable whole-number column.
///
/// Dataframe exports write integer columns containing nulls as floats, so
/// `"3"` and `"3.0"` are both accepted; `"3.5"` is rejected.
pub fn deserialize_optional_whole<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let s = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };
    let value: f64 = s
        .parse()
        .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}")))?;
    if value.is_nan() {
        return Ok(None);
    }
    if value < 0.0 || value.fract() != 0.0 {
        return Err(de::Error::custom(format!(
            "expected a whole non-negative number, got {s:?}"
        )));
    }
    T::try_from(value as u64)
        .map(Some)
        .map_err(|_| de::Error::custom(format!("value out of range: {s:?}")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
