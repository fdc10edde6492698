//! Solar and Lunar Ephemeris Module
//!
//! Truncated low-precision series for the geocentric equatorial position of
//! the Sun and the Moon, after the formulas at aa.quae.nl
//! (zonpositie / hemelpositie). Good to a few arc minutes, which is plenty
//! for display-grade position, phase and rise/set work.

use serde::Serialize;
use std::f64::consts::PI;

use crate::coords::{EquatorialCoords, RAD, declination, right_ascension};

// ===================== SUN =====================

/// Ecliptic longitude of Earth's perihelion
const PERIHELION: f64 = RAD * 102.9372;

/// Solar mean anomaly for `d` days since J2000.
pub fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.98560028 * d)
}

/// Ecliptic longitude of the Sun from its mean anomaly.
pub fn ecliptic_longitude(m: f64) -> f64 {
    // equation of center
    let c = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    m + c + PERIHELION + PI
}

/// Geocentric equatorial coordinates of the Sun.
pub fn sun_coords(d: f64) -> EquatorialCoords {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    EquatorialCoords { ra: right_ascension(l, 0.0), dec: declination(l, 0.0) }
}

// ===================== MOON =====================

/// Geocentric equatorial coordinates of the Moon plus its distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonCoords {
    /// Right ascension in radians
    pub ra: f64,
    /// Declination in radians
    pub dec: f64,
    /// Earth–Moon distance in km
    pub dist: f64,
}

impl MoonCoords {
    pub fn equatorial(&self) -> EquatorialCoords {
        EquatorialCoords { ra: self.ra, dec: self.dec }
    }
}

/// Geocentric coordinates of the Moon for `d` days since J2000.
pub fn moon_coords(d: f64) -> MoonCoords {
    let l0 = RAD * (218.316 + 13.176396 * d); // mean ecliptic longitude
    let m = RAD * (134.963 + 13.064993 * d); // mean anomaly
    let f = RAD * (93.272 + 13.229350 * d); // mean distance from ascending node

    let l = l0 + RAD * 6.289 * m.sin();
    let b = RAD * 5.128 * f.sin();
    let dist = 385_001.0 - 20_905.0 * m.cos();

    MoonCoords { ra: right_ascension(l, b), dec: declination(l, b), dist }
}

// ===================== TESTS =====================
