//! Geographic Location Module
//!
//! Observer location and the single place where its degrees are turned into
//! the radians the formulas expect.

use serde::Serialize;

use crate::coords::RAD;
use crate::error::MoonCalcError;

// ===================== CONSTANTS =====================

/// Lunar apparent radius in degrees (angular semi-diameter)
pub const LUNAR_RADIUS_DEG: f64 = 0.133;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

// ===================== LOCATION =====================

/// Observer position on Earth in degrees.
///
/// Ranges are a precondition: `new` accepts anything and out-of-range
/// values give defined but meaningless results. Use `checked` at input
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180, east positive)
    pub lng: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a location, rejecting out-of-range coordinates.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, MoonCalcError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MoonCalcError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(MoonCalcError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude φ in radians.
    pub fn phi(&self) -> f64 {
        RAD * self.lat
    }

    /// West longitude in radians (east longitude negated).
    pub fn lw(&self) -> f64 {
        RAD * -self.lng
    }
}

// ===================== HELPERS =====================

/// 16-wind compass label for a north-based bearing in degrees.
pub fn compass_point(bearing_deg: f64) -> &'static str {
    let idx = (bearing_deg.rem_euclid(360.0) / 22.5).round() as usize % 16;
    COMPASS_POINTS[idx]
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_radian_conversion() {
        let loc = GeoLocation::new(50.5, 30.5);
        assert_abs_diff_eq!(loc.phi(), 50.5_f64.to_radians(), epsilon = 1e-15);
        assert_abs_diff_eq!(loc.lw(), -30.5_f64.to_radians(), epsilon = 1e-15);
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert_eq!(GeoLocation::checked(90.5, 0.0), Err(MoonCalcError::LatitudeOutOfRange(90.5)));
        assert_eq!(
            GeoLocation::checked(0.0, -180.1),
            Err(MoonCalcError::LongitudeOutOfRange(-180.1))
        );
        assert!(GeoLocation::checked(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(-90.0), "W");
        assert_eq!(compass_point(202.5), "SSW");
        assert_eq!(compass_point(130.0), "SE");
    }
}
