//! Command-Line Interface Module
//!
//! Handles argument parsing and validation for the mooncalc binary.

use clap::Parser;
use serde::Deserialize;

use mooncalc::GeoLocation;

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude, env = "MOONCALC_LATITUDE",
          required_unless_present = "show_build_info")]
    pub latitude: Option<f64>,
    /// Observer longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude, env = "MOONCALC_LONGITUDE",
          required_unless_present = "show_build_info")]
    pub longitude: Option<f64>,
    /// Time zone to use ("system", "location", or IANA time zone name)
    #[arg(long, default_value = "system", env = "MOONCALC_TIMEZONE")]
    pub timezone: String,
    /// Use UTC time zone
    #[arg(long)]
    pub utc: bool,

    /// Date for calculations (e.g., "2024-12-25" or "tomorrow"); defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Show Moon position at a specific time (HH:MM[:SS[.fffffffff]] or "now")
    #[arg(long)]
    pub at: Option<String>,

    /// Altitude in degrees the Moon's centre must cross for rise/set
    #[arg(long, default_value_t = mooncalc::geo::LUNAR_RADIUS_DEG, allow_hyphen_values = true,
          value_parser = parse_horizon)]
    pub horizon: f64,

    /// Output in Argos (GNOME Shell) format
    #[arg(long, env = "MOONCALC_ARGOS", conflicts_with = "json")]
    pub argos: bool,
    /// Output as JSON
    #[arg(long, env = "MOONCALC_JSON")]
    pub json: bool,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", env = "MOONCALC_LOG")]
    pub log_level: String,

    /// Show build info from Cargo.lock at time of building
    #[arg(long)]
    pub show_build_info: bool,
}

impl Args {
    /// Observer location; only `None` with `--show-build-info`.
    pub fn location(&self) -> Option<GeoLocation> {
        Some(GeoLocation::new(self.latitude?, self.longitude?))
    }
}

// Define the structure to match what we serialized in build.rs
#[derive(Debug, Deserialize)]
pub struct DepInfo {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse().map_err(|_| format!("Invalid number: {}", s))
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v = parse_number(s)?;
    GeoLocation::checked(v, 0.0).map(|loc| loc.lat).map_err(|e| e.to_string())
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v = parse_number(s)?;
    GeoLocation::checked(0.0, v).map(|loc| loc.lng).map_err(|e| e.to_string())
}

fn parse_horizon(s: &str) -> Result<f64, String> {
    let v = parse_number(s)?;
    if !(-10.0..=30.0).contains(&v) {
        return Err(format!("Horizon must be between -10 and 30 degrees, got {}", v));
    }
    Ok(v)
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_parsers() {
        assert_eq!(parse_latitude("-33.9"), Ok(-33.9));
        assert!(parse_latitude("91").is_err());
        assert!(parse_latitude("north").is_err());
        assert_eq!(parse_longitude("151.2"), Ok(151.2));
        assert!(parse_longitude("-181").is_err());
    }

    #[test]
    fn test_horizon_parser() {
        assert_eq!(parse_horizon("0.133"), Ok(0.133));
        assert!(parse_horizon("45").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "mooncalc",
            "--latitude",
            "50.5",
            "--longitude",
            "-30.5",
            "--utc",
            "--date",
            "2013-03-04",
        ])
        .unwrap();
        assert_eq!(args.location(), Some(GeoLocation::new(50.5, -30.5)));
        assert!(args.utc);
        assert_eq!(args.horizon, mooncalc::geo::LUNAR_RADIUS_DEG);
    }

    #[test]
    fn test_argos_conflicts_with_json() {
        let res = Args::try_parse_from([
            "mooncalc",
            "--latitude",
            "0",
            "--longitude",
            "0",
            "--argos",
            "--json",
        ]);
        assert!(res.is_err());
    }
}
