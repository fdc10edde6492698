//! Moon Position and Illumination Module
//!
//! Composes the ephemeris and transform layers into the two instantaneous
//! queries: where the Moon is for an observer, and how much of it is lit.

use serde::Serialize;
use std::f64::consts::PI;

use crate::coords::{
    RAD, astro_refraction, equatorial_to_horizontal, hour_angle, parallactic_angle,
};
use crate::ephemeris::{moon_coords, sun_coords};
use crate::geo::GeoLocation;
use crate::julian::to_days;

/// Mean Earth–Sun distance in km
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

// ===================== TYPES =====================

/// Apparent position of the Moon for an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPosition {
    /// Azimuth in radians, measured from south towards west
    pub azimuth: f64,
    /// Altitude above the horizon in radians, corrected for refraction
    pub altitude: f64,
    /// Earth–Moon distance in km
    pub distance: f64,
    /// Parallactic angle in radians
    pub parallactic_angle: f64,
}

impl MoonPosition {
    /// Compass bearing in degrees (0 = north, 90 = east).
    pub fn azimuth_deg(&self) -> f64 {
        (self.azimuth / RAD + 180.0).rem_euclid(360.0)
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude / RAD
    }
}

/// Illumination of the Moon's disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonIllumination {
    /// Illuminated fraction, 0 (new) to 1 (full)
    pub fraction: f64,
    /// Position in the lunation: 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter
    pub phase: f64,
    /// Midpoint angle of the bright limb in radians; negative while waxing
    pub angle: f64,
}

impl MoonIllumination {
    pub fn is_waxing(&self) -> bool {
        self.angle < 0.0
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }

    /// Human-readable name of the current phase.
    pub fn phase_name(&self) -> &'static str {
        let phase = self.phase;
        match phase {
            _ if phase <= 1.0 / 16.0 => "New Moon",
            _ if phase <= 3.0 / 16.0 => "Waxing Crescent",
            _ if phase <= 5.0 / 16.0 => "First Quarter",
            _ if phase <= 7.0 / 16.0 => "Waxing Gibbous",
            _ if phase <= 9.0 / 16.0 => "Full Moon",
            _ if phase <= 11.0 / 16.0 => "Waning Gibbous",
            _ if phase <= 13.0 / 16.0 => "Last Quarter",
            _ if phase <= 15.0 / 16.0 => "Waning Crescent",
            _ => "New Moon",
        }
    }
}

// ===================== CALCULATIONS =====================

/// Position of the Moon at `t` (Unix seconds) for an observer at `location`.
pub fn moon_position(t: f64, location: &GeoLocation) -> MoonPosition {
    let phi = location.phi();
    let d = to_days(t);

    let c = moon_coords(d);
    let h = hour_angle(d, location.lw(), c.ra);
    let hc = equatorial_to_horizontal(h, phi, c.dec);
    let pa = parallactic_angle(h, phi, c.dec);

    MoonPosition {
        azimuth: hc.azimuth,
        altitude: hc.altitude + astro_refraction(hc.altitude),
        distance: c.dist,
        parallactic_angle: pa,
    }
}

/// Position of the Moon at `t` (Unix seconds) for latitude/longitude in degrees.
pub fn get_moon_position(t: f64, lat: f64, lng: f64) -> MoonPosition {
    moon_position(t, &GeoLocation::new(lat, lng))
}

/// Illumination of the Moon at `t` (Unix seconds). Geocentric, so the same
/// for every observer.
///
/// Based on mphase.pro from the IDL Astronomy Library and Meeus chapter 48.
pub fn get_moon_illumination(t: f64) -> MoonIllumination {
    let d = to_days(t);
    let s = sun_coords(d);
    let m = moon_coords(d);

    let dra = s.ra - m.ra;
    let phi = (s.dec.sin() * m.dec.sin() + s.dec.cos() * m.dec.cos() * dra.cos()).acos();
    let inc = (SUN_DISTANCE_KM * phi.sin()).atan2(m.dist - SUN_DISTANCE_KM * phi.cos());
    let angle = (s.dec.cos() * dra.sin())
        .atan2(s.dec.sin() * m.dec.cos() - s.dec.cos() * m.dec.sin() * dra.cos());

    let sign = if angle < 0.0 { -1.0 } else { 1.0 };

    MoonIllumination {
        fraction: (1.0 + inc.cos()) / 2.0,
        phase: 0.5 + 0.5 * inc * sign / PI,
        angle,
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    const LAT: f64 = 50.5;
    const LNG: f64 = 30.5;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> f64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().timestamp() as f64
    }

    #[test]
    fn test_reference_position() {
        let pos = get_moon_position(utc(2013, 3, 5, 0), LAT, LNG);
        assert_abs_diff_eq!(pos.azimuth, -0.9783999522438226, epsilon = 1e-7);
        assert_abs_diff_eq!(pos.altitude, 0.014551482243892251, epsilon = 1e-7);
        assert_abs_diff_eq!(pos.distance, 364121.37256256194, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_illumination() {
        let illum = get_moon_illumination(utc(2013, 3, 5, 0));
        assert_abs_diff_eq!(illum.fraction, 0.4848068202456373, epsilon = 1e-7);
        assert_abs_diff_eq!(illum.phase, 0.7548368838538762, epsilon = 1e-7);
        assert_abs_diff_eq!(illum.angle, 1.6732942678578346, epsilon = 1e-7);
        assert!(!illum.is_waxing());
        assert_eq!(illum.phase_name(), "Last Quarter");
    }

    #[test]
    fn test_position_is_pure() {
        let t = utc(2024, 8, 19, 21);
        assert_eq!(get_moon_position(t, LAT, LNG), get_moon_position(t, LAT, LNG));
        assert_eq!(
            moon_position(t, &GeoLocation::new(LAT, LNG)),
            get_moon_position(t, LAT, LNG)
        );
    }

    #[test]
    fn test_refraction_lifts_altitude() {
        let t = utc(2013, 3, 5, 0);
        let loc = GeoLocation::new(LAT, LNG);
        let d = to_days(t);
        let c = moon_coords(d);
        let raw =
            crate::coords::altitude(hour_angle(d, loc.lw(), c.ra), loc.phi(), c.dec);
        assert!(moon_position(t, &loc).altitude > raw);
    }

    #[test]
    fn test_illumination_ranges_over_a_lunation() {
        let start = utc(2024, 1, 1, 0);
        let mut saw_waxing = false;
        let mut saw_waning = false;
        for i in 0..(30 * 24) {
            let illum = get_moon_illumination(start + i as f64 * 3600.0);
            assert!((0.0..=1.0).contains(&illum.fraction));
            assert!((0.0..=1.0).contains(&illum.phase));
            if illum.is_waxing() {
                saw_waxing = true;
                assert!(illum.phase <= 0.5);
            } else {
                saw_waning = true;
                assert!(illum.phase >= 0.5);
            }
        }
        assert!(saw_waxing && saw_waning);
    }

    #[test]
    fn test_full_moon_of_2024_09_18() {
        // Full moon 2024-09-18 02:34 UTC
        let illum = get_moon_illumination(utc(2024, 9, 18, 3));
        assert!(illum.fraction > 0.98, "fraction {}", illum.fraction);
        assert_eq!(illum.phase_name(), "Full Moon");
    }

    #[test]
    fn test_azimuth_degrees_are_north_based() {
        let pos = MoonPosition {
            azimuth: 0.0,
            altitude: 0.0,
            distance: 0.0,
            parallactic_angle: 0.0,
        };
        assert_abs_diff_eq!(pos.azimuth_deg(), 180.0, epsilon = 1e-12);

        let west = MoonPosition { azimuth: PI / 2.0, ..pos };
        assert_abs_diff_eq!(west.azimuth_deg(), 270.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_observer_does_not_panic() {
        // tan(φ) blows up at the pole; the result may be non-finite but the call is total.
        let pos = get_moon_position(utc(2013, 3, 5, 0), 90.0, 0.0);
        assert!(pos.distance.is_finite());
    }
}
