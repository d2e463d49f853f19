//! Binary ephemeris access
//!
//! Readers for JPL Development Ephemerides distributed as binary SPK
//! (Spacecraft Planet Kernel) files in the SPICE format, plus the
//! process-wide provider that loads one kernel lazily and shares it across
//! all request handlers.
//!
//! # Main Components
//!
//! - `daf`: Double Array File format reader (underlying format of SPK files)
//! - `spk`: SPK segment parsing and Chebyshev position evaluation
//! - `chebyshev`: polynomial interpolation used by SPK segments
//! - `provider`: lazily-initialized shared ephemeris handle

pub mod chebyshev;
pub mod daf;
pub mod errors;
pub mod provider;
pub mod spk;

// Re-export primary types for convenience
pub use self::errors::EphemError;
pub use self::provider::{get_ephemeris, Ephemeris, EphemerisConfig};
pub use self::spk::SpkKernel;
