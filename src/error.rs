//! Error Types Module
//!
//! The numeric core is total and never fails; these errors come from the
//! calendar collaborator and from validating user input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoonCalcError {
    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),

    #[error("Invalid time format '{0}'. Use HH:MM, HH:MM:SS, or HH:MM:SS.ns")]
    InvalidTimeFormat(String),

    #[error("The time {time} does not exist on {date} (DST gap/Spring Forward)")]
    NonexistentLocalTime { time: String, date: String },

    #[error("Timestamp {0} is outside the representable calendar range")]
    TimestampOutOfRange(f64),
}
