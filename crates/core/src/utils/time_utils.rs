use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Naive layouts accepted for request dates, tried in order.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 date or datetime.
///
/// Accepts a bare date (`2024-01-01`, read as midnight), a naive datetime with
/// a `T` or space separator (seconds and their fraction optional), or an RFC 3339
/// datetime with an offset, which is normalized to UTC.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Real-valued number of days from `start` to `end`.
///
/// Sub-day components are kept as a fraction of a day. The result is negative
/// when `end` precedes `start`.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta: TimeDelta = end - start;
    let seconds = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9;
    seconds / SECONDS_PER_DAY
}
