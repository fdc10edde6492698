//! Time and Timezone Module
//!
//! The calendar collaborator of the numeric core: epoch seconds ↔ civil
//! time, start-of-day lookup in a timezone, and the parsing/formatting
//! helpers the command line needs. The core itself only does Julian-day
//! algebra.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use iana_time_zone::get_timezone;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

use crate::error::MoonCalcError;

// tzf-rs DefaultFinder is pre-compiled and very fast
static TZF_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

// ===================== EPOCH SECONDS =====================

/// Convert Unix seconds to a time in `tz`, keeping sub-second precision.
pub fn to_datetime<Z: TimeZone>(t: f64, tz: &Z) -> Result<DateTime<Z>, MoonCalcError> {
    if !t.is_finite() {
        return Err(MoonCalcError::TimestampOutOfRange(t));
    }
    let secs = t.floor();
    let nanos = ((t - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .map(|utc| utc.with_timezone(tz))
        .ok_or(MoonCalcError::TimestampOutOfRange(t))
}

/// Unix seconds of a zoned time.
pub fn to_timestamp<Z: TimeZone>(dt: &DateTime<Z>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9
}

// ===================== START OF DAY =====================

/// First valid instant of calendar day `date` in `tz`.
///
/// 00:00 when it exists, the earlier instant when it is ambiguous, and
/// 01:00 when midnight falls into a DST gap.
pub fn midnight<Z: TimeZone>(date: NaiveDate, tz: &Z) -> Option<DateTime<Z>> {
    match tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(t, _) => Some(t),
        LocalResult::None => tz.from_local_datetime(&date.and_hms_opt(1, 0, 0)?).earliest(),
    }
}

/// Unix seconds of the start of the civil day containing `t` in `tz`.
pub fn start_of_day<Z: TimeZone>(t: f64, tz: &Z) -> Result<f64, MoonCalcError> {
    let local = to_datetime(t, tz)?;
    midnight(local.date_naive(), tz)
        .map(|dt| to_timestamp(&dt))
        .ok_or(MoonCalcError::TimestampOutOfRange(t))
}

// ===================== TIME PARSING =====================

/// Parse a time string in HH:MM[:SS[.fffffffff]] format.
///
/// # Returns
/// Tuple of (hours, minutes, seconds, nanoseconds)
pub fn parse_time_ns(s: &str) -> Result<(u32, u32, u32, u32), MoonCalcError> {
    let formats = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

    for fmt in formats {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok((t.hour(), t.minute(), t.second(), t.nanosecond()));
        }
    }
    Err(MoonCalcError::InvalidTimeFormat(s.to_string()))
}

/// Resolve wall-clock `time` on `date` in `tz` to a single instant.
///
/// Ambiguous times (DST fall back) resolve to the earlier instant.
pub fn resolve_local(date: NaiveDate, time: &str, tz: &Tz) -> Result<DateTime<Tz>, MoonCalcError> {
    let (h, m, s, ns) = parse_time_ns(time)?;
    let naive = date
        .and_hms_nano_opt(h, m, s, ns)
        .ok_or_else(|| MoonCalcError::InvalidTimeFormat(time.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(t1, t2) => {
            log::info!(
                "{} is ambiguous on {}, using {} (vs {})",
                time,
                date,
                t1.format("%H:%M:%S %Z"),
                t2.format("%H:%M:%S %Z")
            );
            Ok(t1)
        }
        LocalResult::None => Err(MoonCalcError::NonexistentLocalTime {
            time: time.to_string(),
            date: date.to_string(),
        }),
    }
}

// ===================== TIMEZONE UTILITIES =====================

/// The system's configured timezone, UTC when it cannot be determined.
pub fn system_timezone() -> Tz {
    get_timezone().ok().and_then(|s| s.parse().ok()).unwrap_or(Tz::UTC)
}

/// Timezone in force at a geographic position, UTC when unresolved.
pub fn resolve_timezone(lon: f64, lat: f64) -> Tz {
    let finder = TZF_FINDER.get_or_init(DefaultFinder::new);
    finder.get_tz_name(lon, lat).parse::<Tz>().unwrap_or(Tz::UTC)
}

// ===================== FORMATTING =====================

/// Format a duration in seconds as "Xh Ym Zs" (sign ignored).
pub fn format_hms(seconds: i64) -> String {
    let total_seconds = seconds.abs();
    if total_seconds == 0 {
        return "0s".to_string();
    }

    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;

    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 {
        parts.push(format!("{}s", s));
    }

    parts.join(" ")
}

// ===================== TESTS =====================
