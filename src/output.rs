//! Output Formatting Module
//!
//! Terminal, Argos (GNOME Shell) and JSON renderings of the moon report.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use mooncalc::geo::compass_point;
use mooncalc::lunar::{MoonEvent, MoonEvents, visible_duration};
use mooncalc::time::format_hms;
use mooncalc::{GeoLocation, MoonIllumination, MoonPosition};

// ===================== REPORT =====================

/// Everything the binary prints, in one serializable record.
#[derive(Debug, Serialize)]
pub struct Report {
    pub location: GeoLocation,
    pub timezone: String,
    pub date: String,
    pub horizon_deg: f64,
    pub at: String,
    pub position: MoonPosition,
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    pub illumination: MoonIllumination,
    pub phase_name: &'static str,
    pub rise: Option<String>,
    pub set: Option<String>,
    pub always_up: bool,
    pub always_down: bool,
    pub visible_seconds: Option<i64>,
}

impl Report {
    pub fn new(
        location: GeoLocation,
        horizon_deg: f64,
        at: DateTime<Tz>,
        position: MoonPosition,
        illumination: MoonIllumination,
        events: &MoonEvents,
    ) -> Self {
        let stamp = |e: &Option<MoonEvent>| e.as_ref().map(|(t, _)| t.to_rfc3339());
        Self {
            location,
            timezone: at.timezone().to_string(),
            date: at.date_naive().to_string(),
            horizon_deg,
            at: at.to_rfc3339(),
            position,
            azimuth_deg: position.azimuth_deg(),
            altitude_deg: position.altitude_deg(),
            illumination,
            phase_name: illumination.phase_name(),
            rise: stamp(&events.rise),
            set: stamp(&events.set),
            always_up: events.always_up,
            always_down: events.always_down,
            visible_seconds: visible_duration(events),
        }
    }
}

pub fn print_json(report: &Report) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

// ===================== ARGOS OUTPUT =====================

/// Moon glyph for the phase name.
pub fn phase_glyph(illum: &MoonIllumination) -> &'static str {
    match illum.phase_name() {
        "New Moon" => "🌑",
        "Waxing Crescent" => "🌒",
        "First Quarter" => "🌓",
        "Waxing Gibbous" => "🌔",
        "Full Moon" => "🌕",
        "Waning Gibbous" => "🌖",
        "Last Quarter" => "🌗",
        _ => "🌘",
    }
}

/// Print output in Argos (GNOME Shell extension) format.
///
/// The first line goes to the top panel, the rest to the drop-down menu.
pub fn print_argos(
    pos: &MoonPosition,
    illum: &MoonIllumination,
    events: &MoonEvents,
    next: Option<(&str, DateTime<Tz>)>,
) {
    println!(
        "{} {:.0}% Alt: {:.1}° Az: {:.1}°",
        phase_glyph(illum),
        illum.percent(),
        pos.altitude_deg(),
        pos.azimuth_deg()
    );
    println!("---");
    println!("{} ({:.1}% lit)", illum.phase_name(), illum.percent());
    println!("---");

    if let Some((t, az)) = events.rise {
        println!("Moonrise: {} (Az: {:.1}°)", t.format("%H:%M:%S"), az);
    }
    if let Some((t, az)) = events.set {
        println!("Moonset: {} (Az: {:.1}°)", t.format("%H:%M:%S"), az);
    }
    if events.always_up {
        println!("Moon up all day");
    } else if events.always_down {
        println!("Moon down all day");
    }
    if let Some((kind, t)) = next {
        println!("Next {}: {} {}", kind, t.date_naive(), t.format("%H:%M"));
    }
}

// ===================== TERMINAL OUTPUT =====================

/// Print the Moon's position and illumination at `at`.
pub fn print_moon_at(at: DateTime<Tz>, pos: &MoonPosition, illum: &MoonIllumination) {
    let bearing = pos.azimuth_deg();
    println!("Moon at {}", at.format("%Y-%m-%d %H:%M:%S %Z"));
    println!("  Azimuth    : {:8.3}° ({})", bearing, compass_point(bearing));
    println!("  Altitude   : {:8.3}°", pos.altitude_deg());
    println!("  Distance   : {:8.0} km", pos.distance);
    println!("  Parallactic: {:8.3}°", pos.parallactic_angle.to_degrees());
    println!(
        "Illumination: {:.1}% ({}, {})",
        illum.percent(),
        illum.phase_name(),
        if illum.is_waxing() { "waxing" } else { "waning" }
    );
    println!("Phase       : {:.4}", illum.phase);
}

/// Print moonrise/moonset for the day, or the next event when there is none.
pub fn print_moon_events(events: &MoonEvents, next: Option<(&str, DateTime<Tz>)>) {
    let print_event = |label: &str, event: &Option<MoonEvent>| {
        if let Some((t, az)) = event {
            println!("{:<12}: {}", label, t.format("%H:%M:%S %Z"));
            println!("  Azimuth   : {:8.3}° ({})", az, compass_point(*az));
        } else {
            println!("{:<12}: none", label);
        }
    };

    if events.always_up {
        println!("Moon is above the horizon all day.");
    } else if events.always_down {
        println!("Moon is below the horizon all day.");
    } else {
        // Chronological order
        match (&events.rise, &events.set) {
            (Some((r, _)), Some((s, _))) if s < r => {
                print_event("Moonset", &events.set);
                print_event("Moonrise", &events.rise);
            }
            _ => {
                print_event("Moonrise", &events.rise);
                print_event("Moonset", &events.set);
            }
        }
        if let Some(secs) = visible_duration(events) {
            println!("Moon up     : {}", format_hms(secs));
        }
    }

    if let Some((kind, t)) = next {
        println!("Next {} on {} at {}", kind, t.date_naive(), t.format("%H:%M:%S %Z"));
    }
}

// ===================== TESTS =====================
