//! Error types for the ephem module

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ephemeris functionality
#[derive(Error, Debug)]
pub enum EphemError {
    /// A file I/O operation failed
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// No kernel file was found at any of the configured locations
    #[error("No ephemeris kernel found in {dir:?} (tried {tried:?})")]
    KernelNotFound {
        /// The directory that was searched
        dir: PathBuf,
        /// The filenames tried, in preference order
        tried: Vec<String>,
    },

    /// The file is not a readable DAF/SPK kernel
    #[error("Invalid kernel format: {0}")]
    InvalidFormat(String),

    /// The requested epoch is outside the range covered by a segment
    #[error("Date {jd} is outside ephemeris range ({start_jd}..{end_jd})")]
    OutOfRange {
        /// The Julian date that was requested
        jd: f64,
        /// The start of the segment's range
        start_jd: f64,
        /// The end of the segment's range
        end_jd: f64,
    },

    /// The kernel has no segment for the requested body
    #[error("Body not found in kernel: target={target}")]
    BodyNotFound {
        /// The target body ID
        target: i32,
    },

    /// The segment's SPK data type is not supported
    #[error("Unsupported SPK data type: {0}")]
    UnsupportedDataType(i32),
}

/// Extension of the Result type for ephem operations
pub type Result<T> = std::result::Result<T, EphemError>;

/// Helper to wrap a std::io::Error with the offending path
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> EphemError {
    EphemError::FileError {
        path: path.into(),
        source: err,
    }
}
