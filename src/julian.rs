//! Julian Date Module
//!
//! Conversions between Unix epoch seconds, Julian dates and fractional days
//! since the J2000.0 epoch. The series in this crate are fitted around the
//! year 2000, so everything downstream works in days since J2000.

use chrono::{DateTime, Utc};

// ===================== CONSTANTS =====================

/// Seconds in one day
pub const DAY_SECS: f64 = 86_400.0;

/// Julian day number at 1970-01-01 12:00 UTC
pub const J1970: f64 = 2_440_588.0;

/// Julian date of 2000-01-01 12:00 UTC
pub const J2000: f64 = 2_451_545.0;

// ===================== CONVERSIONS =====================

/// Convert Unix epoch seconds to a Julian date.
pub fn to_julian(t: f64) -> f64 {
    t / DAY_SECS - 0.5 + J1970
}

/// Convert a Julian date back to Unix epoch seconds.
pub fn from_julian(j: f64) -> f64 {
    (j + 0.5 - J1970) * DAY_SECS
}

/// Convert a Julian date to a UTC calendar time.
///
/// Returns `None` when the date falls outside chrono's supported range.
/// Sub-second precision is kept down to the nanosecond.
pub fn from_julian_utc(j: f64) -> Option<DateTime<Utc>> {
    let t = from_julian(j);
    if !t.is_finite() {
        return None;
    }
    let secs = t.floor();
    let nanos = ((t - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}

/// Fractional days since J2000.0 (negative before 2000-01-01 12:00 UTC).
pub fn to_days(t: f64) -> f64 {
    to_julian(t) - J2000
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    #[test]
    fn test_unix_epoch_is_j1970_minus_half() {
        assert_abs_diff_eq!(to_julian(0.0), 2_440_587.5, epsilon = 1e-9);
    }

    #[test]
    fn test_j2000_epoch_is_day_zero() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap().timestamp() as f64;
        assert_abs_diff_eq!(to_days(t), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_days_negative_before_2000() {
        let t = Utc.with_ymd_and_hms(1999, 12, 31, 12, 0, 0).unwrap().timestamp() as f64;
        assert_abs_diff_eq!(to_days(t), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_julian_round_trip() {
        // Seconds-level tolerance scales with magnitude of the Julian date (~2.4e6 days).
        for &t in &[-2_208_988_800.0, -1.5, 0.0, 86_399.75, 1_362_441_600.0, 4_102_444_800.0] {
            let back = from_julian(to_julian(t));
            assert_abs_diff_eq!(back, t, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_from_julian_utc_calendar() {
        let dt = from_julian_utc(J2000).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());

        assert!(from_julian_utc(f64::NAN).is_none());
    }
}
