//! Coordinate Transform Module
//!
//! Ecliptic → equatorial → horizontal conversions, sidereal time and the
//! empirical refraction correction. All angles are radians.

use serde::Serialize;
use std::f64::consts::PI;

// ===================== CONSTANTS =====================

/// Degrees to radians
pub const RAD: f64 = PI / 180.0;

/// Obliquity of the ecliptic (fixed, no secular drift)
pub const OBLIQUITY: f64 = RAD * 23.4397;

// ===================== TYPES =====================

/// Geocentric equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialCoords {
    /// Right ascension in radians
    pub ra: f64,
    /// Declination in radians
    pub dec: f64,
}

/// Horizontal coordinates relative to the astronomic horizon.
///
/// Azimuth is measured from south, positive towards west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalCoords {
    pub azimuth: f64,
    pub altitude: f64,
}

// ===================== ECLIPTIC → EQUATORIAL =====================

/// Right ascension of the ecliptic point (`l`, `b`).
pub fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

/// Declination of the ecliptic point (`l`, `b`).
pub fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Ecliptic longitude/latitude to equatorial coordinates.
pub fn ecliptic_to_equatorial(l: f64, b: f64) -> EquatorialCoords {
    EquatorialCoords { ra: right_ascension(l, b), dec: declination(l, b) }
}

// ===================== SIDEREAL TIME =====================

/// Local sidereal time.
///
/// # Arguments
/// * `d` - Fractional days since J2000
/// * `lw` - West longitude in radians (negated east longitude)
pub fn sidereal_time(d: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.9856235 * d) - lw
}

/// Hour angle of a body with right ascension `ra`.
pub fn hour_angle(d: f64, lw: f64, ra: f64) -> f64 {
    sidereal_time(d, lw) - ra
}

// ===================== EQUATORIAL → HORIZONTAL =====================

pub fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

pub fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Horizontal coordinates for hour angle `h`, observer latitude `phi` and
/// declination `dec`.
pub fn equatorial_to_horizontal(h: f64, phi: f64, dec: f64) -> HorizontalCoords {
    HorizontalCoords { azimuth: azimuth(h, phi, dec), altitude: altitude(h, phi, dec) }
}

/// Parallactic angle (Meeus, Astronomical Algorithms, formula 14.1).
pub fn parallactic_angle(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(phi.tan() * dec.cos() - dec.sin() * h.cos())
}

// ===================== REFRACTION =====================

/// Atmospheric refraction in radians for a true altitude `h` in radians.
///
/// Meeus formula 16.4 (1.02 / tan(h + 10.26 / (h + 5.10)) arc minutes, with
/// h in degrees) rewritten for radians. The formula only holds for
/// positive altitudes and has a pole at h ≈ -0.089 rad, so negative
/// altitudes are evaluated as 0.
pub fn astro_refraction(h: f64) -> f64 {
    let h = if h < 0.0 { 0.0 } else { h };
    0.0002967 / (h + 0.00312536 / (h + 0.08901179)).tan()
}

// ===================== TESTS =====================
