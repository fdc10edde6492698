//! Moon position, illumination and rise/set times.
//!
//! A small low-precision lunar ephemeris: truncated solar and lunar series,
//! the usual ecliptic → equatorial → horizontal transforms and a
//! quadratic-interpolation rise/set finder. Angles are degrees at the public
//! boundary and radians everywhere else; times are Unix seconds.
//!
//! ```
//! let pos = mooncalc::get_moon_position(1_362_441_600.0, 50.5, 30.5);
//! assert!(pos.distance > 356_500.0 && pos.distance < 406_700.0);
//! ```

pub mod coords;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod julian;
pub mod lunar;
pub mod moon;
pub mod rise_set;
pub mod time;

pub use error::MoonCalcError;
pub use geo::GeoLocation;
pub use lunar::{LunarCalc, MoonEvent, MoonEvents};
pub use moon::{MoonIllumination, MoonPosition, get_moon_illumination, get_moon_position};
pub use rise_set::{MoonTimes, get_moon_times, get_moon_times_in};
