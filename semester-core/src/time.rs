//! Time utilities: timezone-aware parsing of the naive timestamps found in
//! exported sheets.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse a timestamp into UTC.
///
/// RFC 3339 strings keep their own offset. Naive date-times (and bare dates,
/// taken as midnight) are read in the IANA zone `tz`.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let ndt = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| anyhow::anyhow!("invalid timestamp '{raw}'"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("nonexistent local time (DST gap?): {raw} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Fractional days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 86_400_000.0
}
