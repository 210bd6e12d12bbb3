//! Date and time generators.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use rand::Rng;
use record_core::{ScalarKind, Value};

/// Earliest generated instant: 1970-01-02T00:00:00Z.
const MIN_SECS: i64 = 86_400;

/// Latest generated instant (exclusive): 2100-01-01T00:00:00Z.
const MAX_SECS: i64 = 4_102_444_800;

const SECS_PER_DAY: u32 = 86_400;

/// Generate a random instant after the epoch and before 2100.
pub fn random_instant<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    let secs = rng.gen_range(MIN_SECS..MAX_SECS);
    DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
}

/// Generate a random value of a temporal scalar kind.
///
/// Non-temporal kinds produce `Value::Null`.
pub fn generate_temporal<R: Rng>(kind: ScalarKind, rng: &mut R) -> Value {
    match kind {
        ScalarKind::Time => {
            let secs = rng.gen_range(1..SECS_PER_DAY);
            NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
                .map(Value::Time)
                .unwrap_or(Value::Null)
        }
        ScalarKind::ZonedDateTime => {
            let hours: i32 = rng.gen_range(-12..=14);
            let offset = FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix());
            Value::ZonedDateTime(random_instant(rng).with_timezone(&offset))
        }
        _ => temporal_value(kind, random_instant(rng)).unwrap_or(Value::Null),
    }
}

/// Express an instant as a value of the given temporal kind.
///
/// Returns `None` for non-temporal kinds.
pub fn temporal_value(kind: ScalarKind, instant: DateTime<Utc>) -> Option<Value> {
    let value = match kind {
        ScalarKind::Date => Value::Date(instant.date_naive()),
        ScalarKind::Time => Value::Time(instant.time()),
        ScalarKind::LocalDateTime => Value::LocalDateTime(instant.naive_utc()),
        ScalarKind::Timestamp => Value::Timestamp(instant),
        ScalarKind::ZonedDateTime => Value::ZonedDateTime(instant.with_timezone(&Utc.fix())),
        _ => return None,
    };
    Some(value)
}

/// Generate a random instant in the given range (inclusive).
///
/// A reversed or empty range yields `start`.
pub fn generate_timestamp_range<R: Rng>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        start
    } else {
        let random_ts = rng.gen_range(start_ts..=end_ts);
        DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
    }
}

/// Parse a timestamp string in RFC 3339 or `YYYY-MM-DD` form.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
