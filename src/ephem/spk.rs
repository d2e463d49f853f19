//! Spacecraft Planet Kernel (SPK) reading and evaluation
//!
//! An SPK file is a DAF whose segments carry Chebyshev coefficients for the
//! position of one body (the target) relative to another (the center) over
//! a span of TDB time. Planetary kernels chain segments through barycenters:
//! Earth (399) is stored relative to the Earth-Moon barycenter (3), which is
//! stored relative to the solar system barycenter (0).
//!
//! Segment coefficient data is decoded eagerly at open time so that a loaded
//! kernel is immutable and can be evaluated concurrently without locking.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use nalgebra::Vector3;

use crate::ephem::chebyshev;
use crate::ephem::daf::Daf;
use crate::ephem::errors::{EphemError, Result};

/// J2000 epoch as Julian date
const T0: f64 = 2_451_545.0;
/// Seconds per day
const S_PER_DAY: f64 = 86_400.0;
/// NAIF id of the solar system barycenter, the root of every segment chain
const SSB: i32 = 0;
/// Longest accepted center chain (planetary kernels need two hops at most)
const MAX_CHAIN: usize = 8;

/// Convert TDB seconds since J2000 to a Julian date
pub fn seconds_to_jd(seconds: f64) -> f64 {
    T0 + seconds / S_PER_DAY
}

/// Convert a Julian date to TDB seconds since J2000
pub fn jd_to_seconds(jd: f64) -> f64 {
    (jd - T0) * S_PER_DAY
}

/// One SPK segment with its decoded Chebyshev records
#[derive(Debug)]
pub struct Segment {
    /// Source of the segment (e.g. "DE-0440LE-0440")
    pub source: String,
    /// Target body ID
    pub target: i32,
    /// Center body ID
    pub center: i32,
    /// Reference frame ID (1 = J2000)
    pub frame: i32,
    /// SPK data type (2: position, 3: position and velocity)
    pub data_type: i32,
    /// Initial epoch in TDB seconds since J2000
    pub start_second: f64,
    /// Final epoch in TDB seconds since J2000
    pub end_second: f64,
    /// Initial epoch as a Julian date
    pub start_jd: f64,
    /// Final epoch as a Julian date
    pub end_jd: f64,

    /// Epoch of the first record, TDB seconds since J2000
    init: f64,
    /// Seconds covered by each record
    intlen: f64,
    /// Words per record
    record_size: usize,
    /// Number of records
    n_records: usize,
    /// Chebyshev coefficients per component
    n_coeffs: usize,
    /// Flat record data: n_records x record_size words
    coefficients: Vec<f64>,
}

impl Segment {
    /// Position of the target relative to the center in kilometers
    pub fn position(&self, et: f64) -> Result<Vector3<f64>> {
        if et < self.start_second || et > self.end_second {
            return Err(EphemError::OutOfRange {
                jd: seconds_to_jd(et),
                start_jd: self.start_jd,
                end_jd: self.end_jd,
            });
        }

        // The final instant of the segment belongs to the last record
        let mut index = ((et - self.init) / self.intlen).floor() as usize;
        if index >= self.n_records {
            index = self.n_records - 1;
        }

        let record = &self.coefficients[index * self.record_size..(index + 1) * self.record_size];
        let mid = record[0];
        let radius = record[1];
        let x = chebyshev::normalize_time(et, mid, radius)?;

        let k = self.n_coeffs;
        let coeffs = &record[2..];
        Ok(Vector3::new(
            chebyshev::evaluate(&coeffs[..k], x),
            chebyshev::evaluate(&coeffs[k..2 * k], x),
            chebyshev::evaluate(&coeffs[2 * k..3 * k], x),
        ))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} target={} center={} type={} jd {:.1}..{:.1}",
            self.source, self.target, self.center, self.data_type, self.start_jd, self.end_jd
        )
    }
}

/// A loaded SPK kernel: every usable segment, indexed by target body
#[derive(Debug)]
pub struct SpkKernel {
    /// Path the kernel was loaded from
    pub path: PathBuf,
    /// Internal file name from the DAF file record
    pub ifname: String,
    /// Segments in file order
    pub segments: Vec<Segment>,
    by_target: HashMap<i32, usize>,
}

impl SpkKernel {
    /// Open an SPK file and decode all position segments
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let daf = Daf::open(path)?;
        if daf.locidw != "DAF/SPK" && daf.locidw != "NAIF/DAF" {
            return Err(EphemError::InvalidFormat(format!(
                "Not an SPK kernel: identification word {:?}",
                daf.locidw
            )));
        }
        if daf.nd != 2 || daf.ni != 6 {
            return Err(EphemError::InvalidFormat(format!(
                "Unexpected SPK summary layout: nd={}, ni={}",
                daf.nd, daf.ni
            )));
        }

        let mut segments = Vec::new();
        let mut by_target = HashMap::new();

        for summary in daf.summaries()? {
            // nd == 2 and ni == 6 were validated above
            let (target, center, frame, data_type, start_word, end_word) = (
                summary.ints[0],
                summary.ints[1],
                summary.ints[2],
                summary.ints[3],
                summary.ints[4],
                summary.ints[5],
            );
            if data_type != 2 && data_type != 3 {
                log::debug!(
                    "Skipping segment for target {} with unsupported data type {}",
                    target,
                    data_type
                );
                continue;
            }

            let segment = Self::decode_segment(
                &daf,
                summary.name,
                summary.doubles[0],
                summary.doubles[1],
                target,
                center,
                frame,
                data_type,
                start_word as usize,
                end_word as usize,
            )?;

            let index = segments.len();
            segments.push(segment);
            // First segment for a target wins, matching file precedence
            by_target.entry(target).or_insert(index);
        }

        if segments.is_empty() {
            return Err(EphemError::InvalidFormat(format!(
                "Kernel {:?} contains no usable position segments",
                daf.path
            )));
        }

        Ok(SpkKernel {
            path: daf.path.clone(),
            ifname: daf.ifname.clone(),
            segments,
            by_target,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_segment(
        daf: &Daf,
        source: String,
        start_second: f64,
        end_second: f64,
        target: i32,
        center: i32,
        frame: i32,
        data_type: i32,
        start_word: usize,
        end_word: usize,
    ) -> Result<Segment> {
        if end_word < start_word + 4 {
            return Err(EphemError::InvalidFormat(format!(
                "Segment for target {} is too short: words {}..{}",
                target, start_word, end_word
            )));
        }

        // Directory trailer: INIT, INTLEN, RSIZE, N
        let trailer = daf.words(end_word - 3, end_word)?;
        let init = trailer[0];
        let intlen = trailer[1];
        let record_size = trailer[2] as usize;
        let n_records = trailer[3] as usize;

        let n_components = if data_type == 2 { 3 } else { 6 };
        if record_size < 2 + n_components
            || (record_size - 2) % n_components != 0
            || intlen <= 0.0
            || n_records == 0
        {
            return Err(EphemError::InvalidFormat(format!(
                "Segment for target {} has a bad directory: rsize={}, n={}, intlen={}",
                target, record_size, n_records, intlen
            )));
        }
        let expected_words = n_records
            .checked_mul(record_size)
            .and_then(|words| words.checked_add(4))
            .ok_or_else(|| {
                EphemError::InvalidFormat(format!(
                    "Segment for target {} has an absurd directory: rsize={}, n={}",
                    target, record_size, n_records
                ))
            })?;
        if end_word - start_word + 1 < expected_words {
            return Err(EphemError::InvalidFormat(format!(
                "Segment for target {} holds {} words but its directory needs {}",
                target,
                end_word - start_word + 1,
                expected_words
            )));
        }

        let coefficients = daf.words(start_word, end_word - 4)?;

        Ok(Segment {
            source,
            target,
            center,
            frame,
            data_type,
            start_second,
            end_second,
            start_jd: seconds_to_jd(start_second),
            end_jd: seconds_to_jd(end_second),
            init,
            intlen,
            record_size,
            n_records,
            n_coeffs: (record_size - 2) / n_components,
            coefficients,
        })
    }

    /// The segment whose target is the given body
    pub fn segment_for(&self, target: i32) -> Result<&Segment> {
        self.by_target
            .get(&target)
            .map(|&index| &self.segments[index])
            .ok_or(EphemError::BodyNotFound { target })
    }

    /// Position of a body relative to the solar system barycenter, in km
    ///
    /// Walks the center chain (planet -> barycenter -> SSB) and sums the
    /// segment positions.
    pub fn position(&self, target: i32, et: f64) -> Result<Vector3<f64>> {
        let mut total = Vector3::zeros();
        let mut body = target;
        let mut hops = 0;

        while body != SSB {
            if hops >= MAX_CHAIN {
                return Err(EphemError::InvalidFormat(format!(
                    "Segment chain from target {} does not reach the barycenter",
                    target
                )));
            }
            let segment = self.segment_for(body)?;
            total += segment.position(et)?;
            body = segment.center;
            hops += 1;
        }

        Ok(total)
    }

    /// Julian-date span covered by every segment in the kernel
    pub fn coverage(&self) -> Option<(f64, f64)> {
        let start = self
            .segments
            .iter()
            .map(|s| s.start_jd)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .segments
            .iter()
            .map(|s| s.end_jd)
            .fold(f64::NEG_INFINITY, f64::max);
        (start <= end).then_some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Segment with a single constant-position record
    fn constant_segment(target: i32, center: i32, position: [f64; 3]) -> Segment {
        let span = 1_000_000.0;
        Segment {
            source: "TEST".to_string(),
            target,
            center,
            frame: 1,
            data_type: 2,
            start_second: -span,
            end_second: span,
            start_jd: seconds_to_jd(-span),
            end_jd: seconds_to_jd(span),
            init: -span,
            intlen: 2.0 * span,
            record_size: 5,
            n_records: 1,
            n_coeffs: 1,
            coefficients: vec![0.0, span, position[0], position[1], position[2]],
        }
    }

    #[test]
    fn test_constant_segment_position() {
        let segment = constant_segment(4, 0, [100.0, -200.0, 50.0]);
        let p = segment.position(0.0).unwrap();
        assert_relative_eq!(p.x, 100.0);
        assert_relative_eq!(p.y, -200.0);
        assert_relative_eq!(p.z, 50.0);
    }

    #[test]
    fn test_segment_rejects_out_of_range_epoch() {
        let segment = constant_segment(4, 0, [1.0, 2.0, 3.0]);
        let err = segment.position(2_000_000.0).unwrap_err();
        assert!(matches!(err, EphemError::OutOfRange { .. }));
    }

    #[test]
    fn test_segment_end_boundary_is_inclusive() {
        let segment = constant_segment(4, 0, [1.0, 2.0, 3.0]);
        assert!(segment.position(1_000_000.0).is_ok());
    }

    #[test]
    fn test_chain_walk_sums_segments() {
        // EMB relative to SSB, then Earth relative to EMB
        let emb = constant_segment(3, 0, [1000.0, 0.0, 0.0]);
        let earth = constant_segment(399, 3, [0.0, 10.0, 0.0]);
        let kernel = SpkKernel {
            path: PathBuf::from("synthetic"),
            ifname: String::new(),
            segments: vec![emb, earth],
            by_target: HashMap::from([(3, 0), (399, 1)]),
        };

        let p = kernel.position(399, 0.0).unwrap();
        assert_relative_eq!(p.x, 1000.0);
        assert_relative_eq!(p.y, 10.0);
        assert_relative_eq!(p.z, 0.0);

        // The barycenter itself is the chain root
        assert_relative_eq!(kernel.position(0, 0.0).unwrap().norm(), 0.0);
    }

    #[test]
    fn test_unknown_target_is_body_not_found() {
        let kernel = SpkKernel {
            path: PathBuf::from("synthetic"),
            ifname: String::new(),
            segments: vec![constant_segment(3, 0, [1.0, 0.0, 0.0])],
            by_target: HashMap::from([(3, 0)]),
        };
        assert!(matches!(
            kernel.position(42, 0.0),
            Err(EphemError::BodyNotFound { target: 42 })
        ));
    }

    #[test]
    fn test_jd_seconds_roundtrip() {
        assert_relative_eq!(seconds_to_jd(0.0), 2_451_545.0);
        assert_relative_eq!(jd_to_seconds(seconds_to_jd(12345.0)), 12345.0);
    }
}
