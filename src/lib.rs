//! Orrery: solar-system ephemeris queries and orbit-diagram geometry
//!
//! This crate answers the questions behind a planetary web page: how far away
//! is a planet today, where does each planet sit on its orbit, and what is
//! coming up in the sky. Positions are interpolated from a binary JPL
//! ephemeris kernel rather than simulated.

use thiserror::Error;

pub mod almanac;
pub mod bodies;
pub mod constants;
pub mod ephem;
pub mod feeds;
pub mod observe;
pub mod orbit;
pub mod report;
pub mod time;

// Re-export commonly used types
pub use bodies::{resolve, BodyEntry};
pub use ephem::provider::get_ephemeris;
pub use observe::Observer;
pub use time::{Epoch, Timescale};

/// Main error type for the orrery library
#[derive(Debug, Error)]
pub enum OrreryError {
    /// The requested planet identifier is not in the recognized set.
    ///
    /// Callers render this as "planet not found" rather than a generic
    /// failure, so it must stay distinguishable from every other variant.
    #[error("Unknown body: {0:?}")]
    UnknownBody(String),

    /// A date string could not be parsed or normalized
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// No ephemeris kernel could be loaded
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    /// The loaded kernel rejected a computation (bad segment, epoch outside
    /// the kernel's time range, ...)
    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] ephem::EphemError),
}

impl From<time::TimeError> for OrreryError {
    fn from(err: time::TimeError) -> Self {
        OrreryError::InvalidDate(err.to_string())
    }
}

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;
