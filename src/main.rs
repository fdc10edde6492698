use chrono::{DateTime, Utc};
use chrono_english::{Dialect, parse_date_string};
use chrono_tz::Tz;
use clap::Parser;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

mod cli;
mod output;

use cli::{Args, DepInfo};
use mooncalc::LunarCalc;
use mooncalc::time::{resolve_local, resolve_timezone, system_timezone};
use output::Report;

// ===================== LOGGING =====================

/// Start logging to stderr. `RUST_LOG` takes precedence over `level`.
fn setup_logging(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?.log_to_stderr().start()
}

fn print_build_info() -> Result<(), serde_json::Error> {
    println!("Built from Git commit: {}\n", env!("MOONCALC_GIT_HASH"));
    const DEP_INFO_RAW: &str = include_str!(env!("MOONCALC_DEPS_INFO_PATH"));
    let deps: Vec<DepInfo> = serde_json::from_str(DEP_INFO_RAW)?;

    println!("Found {} dependencies.", deps.len());
    for dep in deps {
        println!("- {} v{}", dep.name, dep.version);
        if let Some(sum) = dep.checksum {
            println!("    Checksum: {}", sum);
        }
        if let Some(src) = dep.source {
            println!("    Source:   {}", src);
        }
    }
    Ok(())
}

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _logger = setup_logging(&args.log_level)?;

    if args.show_build_info {
        print_build_info()?;
        return Ok(());
    }

    let location = args.location().ok_or("Latitude and longitude are required")?;

    let tz = if args.utc {
        Tz::UTC
    } else {
        match args.timezone.as_str() {
            "system" => system_timezone(),
            "location" => resolve_timezone(location.lng, location.lat),
            other => other.parse().unwrap_or_else(|_| {
                eprintln!("Warning: unknown time zone '{}', using UTC", other);
                Tz::UTC
            }),
        }
    };
    log::debug!("using time zone {}", tz);

    // Anchor 'today' to the target timezone
    let now = Utc::now().with_timezone(&tz);
    let date = match &args.date {
        Some(s) => parse_date_string(s, now, Dialect::Us)?.with_timezone(&tz),
        None => now,
    };

    let at: DateTime<Tz> = match args.at.as_deref() {
        Some("now") => now,
        Some(time) => resolve_local(date.date_naive(), time, &tz)?,
        None => date,
    };

    let calc = LunarCalc::new(location).with_horizon(args.horizon);
    let pos = calc.position(at);
    let illum = calc.illumination(at);
    let events = calc.times(date);

    let next = if events.rise.is_none() || events.set.is_none() {
        calc.find_next_event(date)
    } else {
        None
    };

    if args.json {
        let report = Report::new(location, calc.horizon, at, pos, illum, &events);
        output::print_json(&report)?;
        return Ok(());
    }

    if args.argos {
        output::print_argos(&pos, &illum, &events, next);
        return Ok(());
    }

    println!("Location : lat={:.6}, lon={:.6}", location.lat, location.lng);
    println!("Timezone : {}", tz);
    println!("Date     : {}", date.date_naive());
    println!("Horizon  : {:.3}°", calc.horizon);
    println!();

    output::print_moon_at(at, &pos, &illum);
    println!();
    output::print_moon_events(&events, next);

    Ok(())
}
