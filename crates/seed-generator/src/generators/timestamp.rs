//! Timestamp value generators.

use crate::config::DateRange;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Generate a random timestamp in `[range.min, range.max)` at millisecond resolution.
///
/// Equivalent to `min + random() * (max - min)` with `random()` in `[0, 1)`,
/// drawn as an integer millisecond offset so the upper bound can never be hit
/// through float rounding. A range narrower than 1ms yields `range.min`.
pub fn generate_timestamp_in<R: Rng + ?Sized>(rng: &mut R, range: &DateRange) -> DateTime<Utc> {
    let span = range.span_millis();
    if span < 1 {
        return range.min;
    }
    let offset = rng.gen_range(0..span);
    range.min + Duration::milliseconds(offset)
}

/// Parse a timestamp string in RFC 3339 or `YYYY-MM-DD` form.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
