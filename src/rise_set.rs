//! Moon Rise/Set Module
//!
//! Finds moonrise and moonset within one civil day by sampling the Moon's
//! altitude every hour and fitting a parabola through each consecutive
//! triple of samples (after stargazing.net/kepler/moonrise.html). Each
//! 2-hour window is solved in closed form for its horizon crossings.

use chrono::{Local, TimeZone, Utc};
use log::{debug, trace, warn};
use serde::Serialize;

use crate::coords::RAD;
use crate::geo::{GeoLocation, LUNAR_RADIUS_DEG};
use crate::julian::DAY_SECS;
use crate::moon::moon_position;
use crate::time::start_of_day;

const HOUR_SECS: f64 = 3_600.0;

// ===================== TYPES =====================

/// Moonrise and moonset for one civil day.
///
/// `always_up` and `always_down` are only ever set when neither a rise nor a
/// set was found, and never together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonTimes {
    /// Unix seconds of moonrise
    pub rise: Option<f64>,
    /// Unix seconds of moonset
    pub set: Option<f64>,
    /// Moon stays above the horizon all day
    pub always_up: bool,
    /// Moon stays below the horizon all day
    pub always_down: bool,
}

/// Horizon crossings of the parabola fitted to one window, in window
/// coordinates (-1 = window start, 0 = middle, 1 = end).
#[derive(Debug, Clone, Copy, PartialEq)]
enum Crossings {
    None,
    One(f64),
    Two(f64, f64),
}

/// Parabola through (-1, h0), (0, h1), (1, h2).
#[derive(Debug, Clone, Copy)]
struct WindowFit {
    /// Value at the vertex
    ye: f64,
    crossings: Crossings,
}

impl WindowFit {
    fn new(h0: f64, h1: f64, h2: f64) -> Self {
        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        let xe = -b / (2.0 * a);
        let ye = (a * xe + b) * xe + h1;
        let d = b * b - 4.0 * a * h1;

        let mut crossings = Crossings::None;
        if d >= 0.0 {
            let dx = d.sqrt() / (a.abs() * 2.0);
            let x1 = xe - dx;
            let x2 = xe + dx;
            let in_window = |x: f64| x.abs() <= 1.0;

            crossings = match (in_window(x1), in_window(x2)) {
                (true, true) => Crossings::Two(x1, x2),
                (true, false) => Crossings::One(x1),
                (false, true) => Crossings::One(x2),
                (false, false) => Crossings::None,
            };
        }

        Self { ye, crossings }
    }
}

// ===================== SOLVER =====================

/// Scan the 24 hours starting at `midnight` (Unix seconds) for moonrise and
/// moonset.
///
/// # Arguments
/// * `midnight` - Start of the civil day in Unix seconds
/// * `location` - Observer location
/// * `horizon_deg` - Altitude in degrees the Moon's centre has to cross
///
/// The first crossing of each kind wins; scanning stops once both are known.
pub fn moon_times_from(midnight: f64, location: &GeoLocation, horizon_deg: f64) -> MoonTimes {
    let hc = horizon_deg * RAD;
    let mut non_finite = false;
    let mut altitude_at = |hours: f64| {
        let h = moon_position(midnight + hours * HOUR_SECS, location).altitude - hc;
        non_finite |= !h.is_finite();
        h
    };

    let mut h0 = altitude_at(0.0);
    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;
    let mut ye = 0.0;

    for i in (1..24u32).step_by(2) {
        let i = f64::from(i);
        let h1 = altitude_at(i);
        let h2 = altitude_at(i + 1.0);

        let fit = WindowFit::new(h0, h1, h2);
        ye = fit.ye;
        trace!("window {:02}h: h0={:.5} h1={:.5} h2={:.5} {:?}", i, h0, h1, h2, fit.crossings);

        match fit.crossings {
            Crossings::None => {}
            Crossings::One(x) => {
                if h0 < 0.0 {
                    rise.get_or_insert(i + x);
                } else {
                    set.get_or_insert(i + x);
                }
            }
            Crossings::Two(x1, x2) => {
                // A dip below the horizon between the crossings means set comes first.
                let (r, s) = if ye < 0.0 { (x2, x1) } else { (x1, x2) };
                rise.get_or_insert(i + r);
                set.get_or_insert(i + s);
            }
        }

        if rise.is_some() && set.is_some() {
            break;
        }

        h0 = h2;
    }

    if non_finite {
        warn!("non-finite moon altitude for {:?} near t = {}", location, midnight);
    }

    // Without a finite sample the day is undefined, not always-down.
    let classify = rise.is_none() && set.is_none() && !non_finite;
    let always_up = classify && ye > 0.0;
    let times = MoonTimes {
        rise: rise.map(|h| midnight + h * HOUR_SECS),
        set: set.map(|h| midnight + h * HOUR_SECS),
        always_up,
        always_down: classify && !always_up,
    };
    debug!("moon times from {}: {:?}", midnight, times);
    times
}

/// Start of the civil day containing `t` in `tz`, or of its UTC day when the
/// local boundary cannot be resolved.
pub fn day_start<Z: TimeZone>(t: f64, tz: &Z) -> f64 {
    start_of_day(t, tz).unwrap_or_else(|e| {
        warn!("{}, falling back to UTC day boundary", e);
        (t / DAY_SECS).floor() * DAY_SECS
    })
}

/// Moon times for the civil day containing `t` in timezone `tz`.
pub fn get_moon_times_in<Z: TimeZone>(t: f64, lat: f64, lng: f64, tz: &Z) -> MoonTimes {
    moon_times_from(day_start(t, tz), &GeoLocation::new(lat, lng), LUNAR_RADIUS_DEG)
}

/// Moon times for the civil day containing `t`, using the UTC day when
/// `use_utc` is set and the host's local day otherwise.
pub fn get_moon_times(t: f64, lat: f64, lng: f64, use_utc: bool) -> MoonTimes {
    if use_utc {
        get_moon_times_in(t, lat, lng, &Utc)
    } else {
        get_moon_times_in(t, lat, lng, &Local)
    }
}

// ===================== TESTS =====================
