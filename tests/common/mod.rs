//! Shared test support: a synthetic SPK kernel writer
//!
//! Builds structurally valid little-endian DAF/SPK files whose segments
//! hold hand-picked Chebyshev coefficients, so observation tests run
//! against exactly known geometry without shipping a real ephemeris.
//!
//! Layout written: file record, one summary record, one name record, then
//! the flat data area. Each segment is a single Type 2 logical record
//! spanning +/- SPAN_SECONDS around J2000.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::TempDir;

use orrery::ephem::{Ephemeris, SpkKernel};

/// Half-width of every synthetic segment's validity window, in TDB seconds
/// past J2000 (about 126 years each way)
pub const SPAN_SECONDS: f64 = 4.0e9;

const RECORD_SIZE: usize = 1024;
const FTPSTR: &[u8] = b"FTPSTR:\r:\n:\r\n:\r\x00:\x81:\x10\xce:ENDFTP";
/// First data word: records 1-3 are file/summary/name records
const DATA_START_WORD: usize = 3 * 128 + 1;

/// One synthetic segment: target relative to center with per-axis
/// Chebyshev coefficients over the shared validity window
pub struct SyntheticSegment {
    pub target: i32,
    pub center: i32,
    pub coeffs: [Vec<f64>; 3],
}

impl SyntheticSegment {
    /// A body pinned at a constant position (single-coefficient series)
    pub fn fixed(target: i32, center: i32, position: [f64; 3]) -> Self {
        SyntheticSegment {
            target,
            center,
            coeffs: [
                vec![position[0]],
                vec![position[1]],
                vec![position[2]],
            ],
        }
    }
}

fn pad_record(buffer: &mut Vec<u8>) {
    let partial = buffer.len() % RECORD_SIZE;
    if partial != 0 {
        buffer.extend(std::iter::repeat(0u8).take(RECORD_SIZE - partial));
    }
}

fn fixed_ascii(text: &str, width: usize) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(width, b' ');
    bytes
}

/// Write a kernel holding the given segments to `path`
pub fn write_kernel(path: &Path, segments: &[SyntheticSegment]) -> io::Result<()> {
    // Lay out the data area first so summaries can carry word addresses
    let mut data: Vec<f64> = Vec::new();
    let mut descriptors = Vec::new();

    for segment in segments {
        let n_coeffs = segment.coeffs.iter().map(Vec::len).max().unwrap_or(1);
        let record_size = 2 + 3 * n_coeffs;
        let start_word = DATA_START_WORD + data.len();

        data.push(0.0); // record midpoint
        data.push(SPAN_SECONDS); // record radius
        for axis in &segment.coeffs {
            data.extend_from_slice(axis);
            data.extend(std::iter::repeat(0.0).take(n_coeffs - axis.len()));
        }
        // Directory trailer: INIT, INTLEN, RSIZE, N
        data.push(-SPAN_SECONDS);
        data.push(2.0 * SPAN_SECONDS);
        data.push(record_size as f64);
        data.push(1.0);

        let end_word = DATA_START_WORD + data.len() - 1;
        descriptors.push((segment.target, segment.center, start_word, end_word));
    }

    let free_word = DATA_START_WORD + data.len();
    let mut buffer: Vec<u8> = Vec::new();

    // File record
    buffer.extend_from_slice(&fixed_ascii("DAF/SPK", 8));
    buffer.write_u32::<LittleEndian>(2)?; // ND
    buffer.write_u32::<LittleEndian>(6)?; // NI
    buffer.extend_from_slice(&fixed_ascii("Synthetic planetary kernel", 60));
    buffer.write_u32::<LittleEndian>(2)?; // FWARD
    buffer.write_u32::<LittleEndian>(2)?; // BWARD
    buffer.write_u32::<LittleEndian>(free_word as u32)?; // FREE
    buffer.extend_from_slice(&fixed_ascii("LTL-IEEE", 8));
    buffer.extend(std::iter::repeat(0u8).take(699 - buffer.len()));
    buffer.extend_from_slice(FTPSTR);
    pad_record(&mut buffer);

    // Summary record: NEXT, PREV, NSUM as doubles, then 5-word summaries
    buffer.write_f64::<LittleEndian>(0.0)?;
    buffer.write_f64::<LittleEndian>(0.0)?;
    buffer.write_f64::<LittleEndian>(descriptors.len() as f64)?;
    for &(target, center, start_word, end_word) in &descriptors {
        buffer.write_f64::<LittleEndian>(-SPAN_SECONDS)?;
        buffer.write_f64::<LittleEndian>(SPAN_SECONDS)?;
        buffer.write_i32::<LittleEndian>(target)?;
        buffer.write_i32::<LittleEndian>(center)?;
        buffer.write_i32::<LittleEndian>(1)?; // frame: J2000
        buffer.write_i32::<LittleEndian>(2)?; // data type: Chebyshev position
        buffer.write_i32::<LittleEndian>(start_word as i32)?;
        buffer.write_i32::<LittleEndian>(end_word as i32)?;
    }
    pad_record(&mut buffer);

    // Name record: one 40-char name per summary
    for _ in &descriptors {
        buffer.extend_from_slice(&fixed_ascii("SYNTHETIC-KERNEL", 40));
    }
    pad_record(&mut buffer);

    // Data area
    for value in &data {
        buffer.write_f64::<LittleEndian>(*value)?;
    }

    let mut file = File::create(path)?;
    file.write_all(&buffer)?;
    Ok(())
}

/// The standard test solar system: constant positions chosen so every
/// heliocentric angle and distance is exactly predictable, with Mercury
/// given a slow linear drift so phase progress is nonzero.
///
/// Earth is chained through the Earth-Moon barycenter the way real kernels
/// store it; the outer planets sit directly on the barycenter.
pub fn standard_segments() -> Vec<SyntheticSegment> {
    vec![
        SyntheticSegment::fixed(10, 0, [0.0, 0.0, 0.0]), // sun
        // Mercury drifts in y: angle 0 at J2000, slowly increasing after
        SyntheticSegment {
            target: 199,
            center: 0,
            coeffs: [vec![5.0e7], vec![0.0, 5.0e7], vec![0.0]],
        },
        SyntheticSegment::fixed(299, 0, [0.0, 1.0e8, 0.0]), // venus
        SyntheticSegment::fixed(3, 0, [1.5e8, 0.0, 0.0]),   // earth-moon barycenter
        SyntheticSegment::fixed(399, 3, [0.0, 4.0e5, 0.0]), // earth, offset from EMB
        SyntheticSegment::fixed(4, 0, [-2.2e8, 0.0, 0.0]),  // mars barycenter
        SyntheticSegment::fixed(5, 0, [0.0, -7.5e8, 0.0]),  // jupiter barycenter
        SyntheticSegment::fixed(6, 0, [1.0e9, 1.0e9, 0.0]), // saturn barycenter
        SyntheticSegment::fixed(7, 0, [-2.0e9, 2.0e9, 0.0]), // uranus barycenter
        SyntheticSegment::fixed(8, 0, [-3.0e9, -3.0e9, 0.0]), // neptune barycenter
        SyntheticSegment::fixed(9, 0, [4.0e9, -4.0e9, 0.0]), // pluto barycenter
    ]
}

/// Write the standard kernel into a fresh temp dir and load it
pub fn standard_ephemeris() -> (TempDir, Ephemeris) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("de421.bsp");
    write_kernel(&path, &standard_segments()).expect("write synthetic kernel");
    let kernel = SpkKernel::open(&path).expect("open synthetic kernel");
    (dir, Ephemeris::from_kernel(kernel))
}
