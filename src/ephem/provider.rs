//! Process-wide ephemeris provider
//!
//! Loading a planetary kernel means mapping and decoding tens of megabytes,
//! so it happens once per process. [`get_ephemeris`] lazily loads the kernel
//! on first use behind a `OnceLock`: concurrent first callers observe exactly
//! one load, and the outcome (including failure) is cached for the process
//! lifetime. The loaded dataset is immutable and shared via `Arc`.

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::ephem::errors::{EphemError, Result};
use crate::ephem::spk::SpkKernel;
use crate::time::Timescale;

/// Kernel filename tried first (the modern long-span ephemeris)
pub const PREFERRED_KERNEL: &str = "de440.bsp";
/// Kernel filename tried when the preferred one is absent
pub const FALLBACK_KERNEL: &str = "de421.bsp";

/// Where to look for kernel files
#[derive(Debug, Clone)]
pub struct EphemerisConfig {
    /// Directory holding kernel files
    pub data_dir: PathBuf,
    /// Filenames to try, in preference order
    pub filenames: Vec<String>,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        let data_dir = env::var("ORRERY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".cache").join("orrery")
            });
        EphemerisConfig {
            data_dir,
            filenames: vec![PREFERRED_KERNEL.to_string(), FALLBACK_KERNEL.to_string()],
        }
    }
}

/// A loaded kernel paired with the timescale used to query it
#[derive(Debug)]
pub struct Ephemeris {
    kernel: SpkKernel,
    timescale: Timescale,
}

impl Ephemeris {
    /// Load the first kernel the config can supply
    ///
    /// A file that exists but fails to parse falls through to the next
    /// candidate; only when every candidate is exhausted does the load fail.
    pub fn load(config: &EphemerisConfig) -> Result<Self> {
        for name in &config.filenames {
            let path = config.data_dir.join(name);
            if !path.is_file() {
                log::debug!("Kernel candidate {:?} not present", path);
                continue;
            }
            match SpkKernel::open(&path) {
                Ok(kernel) => {
                    log::info!(
                        "Loaded ephemeris kernel {:?} ({} segments)",
                        path,
                        kernel.segments.len()
                    );
                    return Ok(Ephemeris::from_kernel(kernel));
                }
                Err(err) => {
                    log::warn!("Kernel candidate {:?} failed to load: {}", path, err);
                }
            }
        }
        Err(EphemError::KernelNotFound {
            dir: config.data_dir.clone(),
            tried: config.filenames.clone(),
        })
    }

    /// Wrap an already-open kernel (used by tests with synthetic kernels)
    pub fn from_kernel(kernel: SpkKernel) -> Self {
        Ephemeris {
            kernel,
            timescale: Timescale::new(),
        }
    }

    /// The loaded kernel
    pub fn kernel(&self) -> &SpkKernel {
        &self.kernel
    }

    /// The timescale for turning calendar dates into kernel epochs
    pub fn timescale(&self) -> Timescale {
        self.timescale
    }
}

static SHARED: OnceLock<std::result::Result<Arc<Ephemeris>, String>> = OnceLock::new();

/// The process-wide ephemeris, loading it on first call
///
/// The error string (not the ephemeris) is cached on failure as well, so a
/// broken installation fails fast on every call instead of retrying the
/// filesystem.
pub fn get_ephemeris() -> crate::Result<Arc<Ephemeris>> {
    let slot = SHARED.get_or_init(|| {
        Ephemeris::load(&EphemerisConfig::default())
            .map(Arc::new)
            .map_err(|err| err.to_string())
    });
    match slot {
        Ok(ephemeris) => Ok(Arc::clone(ephemeris)),
        Err(message) => Err(crate::OrreryError::EphemerisUnavailable(message.clone())),
    }
}
