//! Lunar Calculation Context Module
//!
//! Binds an observer location and a horizon altitude together and exposes
//! the moon calculations in terms of zoned `chrono` times.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::geo::{GeoLocation, LUNAR_RADIUS_DEG};
use crate::moon::{MoonIllumination, MoonPosition, get_moon_illumination, moon_position};
use crate::rise_set::{MoonTimes, day_start, moon_times_from};
use crate::time::{midnight, to_datetime, to_timestamp};

/// How many days `find_next_event` looks ahead before giving up.
const MAX_SEARCH_DAYS: u32 = 60;

// ===================== TYPES =====================

/// Time and compass bearing (degrees) of a moonrise or moonset
pub type MoonEvent = (DateTime<Tz>, f64);

/// Rise/set outcome of one civil day in the observer's timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonEvents {
    pub rise: Option<MoonEvent>,
    pub set: Option<MoonEvent>,
    pub always_up: bool,
    pub always_down: bool,
}

// ===================== CALCULATION CONTEXT =====================

/// Context for moon calculations at one place.
#[derive(Debug, Clone, Copy)]
pub struct LunarCalc {
    /// Observer location
    pub location: GeoLocation,
    /// Altitude in degrees the Moon's centre crosses at rise/set
    pub horizon: f64,
}

impl LunarCalc {
    pub fn new(location: GeoLocation) -> Self {
        Self { location, horizon: LUNAR_RADIUS_DEG }
    }

    pub fn with_horizon(mut self, horizon_deg: f64) -> Self {
        self.horizon = horizon_deg;
        self
    }

    /// Apparent position of the Moon at `t`.
    pub fn position(&self, t: DateTime<Tz>) -> MoonPosition {
        moon_position(to_timestamp(&t), &self.location)
    }

    /// Illumination of the Moon at `t`.
    pub fn illumination(&self, t: DateTime<Tz>) -> MoonIllumination {
        get_moon_illumination(to_timestamp(&t))
    }

    /// Moon altitude relative to the configured horizon, in degrees.
    pub fn altitude_error(&self, t: DateTime<Tz>) -> f64 {
        self.position(t).altitude_deg() - self.horizon
    }

    /// Moonrise and moonset on the calendar day of `date` in its timezone.
    pub fn times(&self, date: DateTime<Tz>) -> MoonEvents {
        let tz = date.timezone();
        let start = day_start(to_timestamp(&date), &tz);
        let raw = moon_times_from(start, &self.location, self.horizon);
        self.zoned(&raw, &tz)
    }

    fn zoned(&self, raw: &MoonTimes, tz: &Tz) -> MoonEvents {
        let event = |t: Option<f64>| -> Option<MoonEvent> {
            let dt = to_datetime(t?, tz).ok()?;
            Some((dt, self.position(dt).azimuth_deg()))
        };
        MoonEvents {
            rise: event(raw.rise),
            set: event(raw.set),
            always_up: raw.always_up,
            always_down: raw.always_down,
        }
    }

    /// Find the next moonrise or moonset strictly after `start`.
    ///
    /// # Returns
    /// Tuple of (event_name, event_time), or None if nothing happens within
    /// `MAX_SEARCH_DAYS`
    pub fn find_next_event(&self, start: DateTime<Tz>) -> Option<(&'static str, DateTime<Tz>)> {
        let tz = start.timezone();
        let mut current = start.date_naive();

        for _ in 0..MAX_SEARCH_DAYS {
            if let Some(day) = midnight(current, &tz) {
                let events = self.times(day);

                let mut found = Vec::new();
                if let Some((t, _)) = events.rise
                    && t > start
                {
                    found.push(("Moonrise", t));
                }
                if let Some((t, _)) = events.set
                    && t > start
                {
                    found.push(("Moonset", t));
                }

                if let Some(next) = found.into_iter().min_by_key(|(_, t)| *t) {
                    return Some(next);
                }
            }

            current = current.succ_opt()?;
        }
        None
    }
}

// ===================== HELPER FUNCTIONS =====================

/// Time the Moon spends above the horizon between a rise and the following set.
///
/// # Returns
/// Duration in seconds, or None unless the set comes after the rise
pub fn visible_duration(events: &MoonEvents) -> Option<i64> {
    let (rise, _) = events.rise?;
    let (set, _) = events.set?;
    let span: Duration = set - rise;
    (span > Duration::zero()).then_some(span.num_seconds())
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Kyiv;
    use chrono_tz::UTC;

    fn kyiv_calc() -> LunarCalc {
        LunarCalc::new(GeoLocation::new(50.5, 30.5))
    }

    #[test]
    fn test_reference_day_in_utc() {
        let calc = kyiv_calc();
        let events = calc.times(UTC.with_ymd_and_hms(2013, 3, 4, 15, 0, 0).unwrap());

        let (rise, rise_az) = events.rise.unwrap();
        let (set, set_az) = events.set.unwrap();
        assert_eq!(rise.format("%H:%M:%S").to_string(), "23:54:29");
        assert_eq!(set.format("%H:%M:%S").to_string(), "07:47:58");

        // Rises in the east, sets in the west
        assert!(rise_az > 0.0 && rise_az < 180.0, "rise azimuth {}", rise_az);
        assert!(set_az > 180.0 && set_az < 360.0, "set azimuth {}", set_az);

        // Set precedes rise on this day, so there is no rise→set span.
        assert_eq!(visible_duration(&events), None);
    }

    #[test]
    fn test_times_anchor_to_local_midnight() {
        let calc = kyiv_calc();
        let afternoon = calc.times(Kyiv.with_ymd_and_hms(2013, 3, 5, 15, 0, 0).unwrap());
        let at_midnight = calc.times(Kyiv.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap());
        assert_eq!(afternoon.rise.map(|(t, _)| t), at_midnight.rise.map(|(t, _)| t));
        assert_eq!(afternoon.set.map(|(t, _)| t), at_midnight.set.map(|(t, _)| t));
        assert_eq!(afternoon.always_up, at_midnight.always_up);
        assert_eq!(afternoon.always_down, at_midnight.always_down);
    }

    #[test]
    fn test_altitude_error_near_zero_at_rise() {
        let calc = kyiv_calc();
        let events = calc.times(UTC.with_ymd_and_hms(2013, 3, 4, 0, 0, 0).unwrap());
        let (rise, _) = events.rise.unwrap();
        assert!(calc.altitude_error(rise).abs() < 0.1, "{}", calc.altitude_error(rise));
    }

    #[test]
    fn test_local_timezone_changes_day() {
        // Kyiv is UTC+2 in March: the local day starts two hours earlier.
        let calc = kyiv_calc();
        let local = calc.times(Kyiv.with_ymd_and_hms(2013, 3, 4, 12, 0, 0).unwrap());
        for (t, _) in local.rise.iter().chain(local.set.iter()) {
            assert_eq!(t.date_naive().to_string(), "2013-03-04");
        }
    }

    #[test]
    fn test_find_next_event() {
        let calc = kyiv_calc();
        let start = UTC.with_ymd_and_hms(2013, 3, 4, 8, 0, 0).unwrap();
        let (kind, t) = calc.find_next_event(start).unwrap();
        assert_eq!(kind, "Moonrise");
        assert_eq!(t.format("%Y-%m-%d %H:%M:%S").to_string(), "2013-03-04 23:54:29");
    }

    #[test]
    fn test_find_next_event_leaves_polar_stretch() {
        let calc = LunarCalc::new(GeoLocation::new(78.2, 15.6));
        let start = UTC.with_ymd_and_hms(2025, 1, 12, 0, 0, 0).unwrap();
        assert!(calc.times(start).always_up);

        let (kind, t) = calc.find_next_event(start).unwrap();
        assert_eq!(kind, "Moonset");
        assert!(t > start && t < start + Duration::days(15));
    }

    #[test]
    fn test_visible_duration_positive_when_rise_first() {
        let calc = kyiv_calc();
        // Moonrise in the morning and moonset in the evening around first quarter.
        let mut found = false;
        for day in 15..25 {
            let events = calc.times(UTC.with_ymd_and_hms(2013, 3, day, 0, 0, 0).unwrap());
            if let (Some((r, _)), Some((s, _))) = (events.rise, events.set)
                && s > r
            {
                let secs = visible_duration(&events).unwrap();
                assert_eq!(secs, (s - r).num_seconds());
                assert!(secs > 0 && secs < 24 * 3600);
                found = true;
            }
        }
        assert!(found);
    }

    #[test]
    fn test_higher_horizon_via_builder() {
        let calc = kyiv_calc().with_horizon(5.0);
        let events = calc.times(UTC.with_ymd_and_hms(2013, 3, 4, 0, 0, 0).unwrap());
        assert_eq!(events.set.unwrap().0.format("%H:%M:%S").to_string(), "07:07:03");
    }
}
