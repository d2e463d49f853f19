//! Double Array File format reader
//!
//! NAIF's Double Array File (DAF) format underlies SPK kernels. The file is
//! a sequence of 1024-byte records: a file record describing the layout,
//! optional comment records, then linked pairs of summary/name records that
//! describe where each data segment lives in the flat array of f64 words.
//!
//! The reader memory-maps the file once; all later access is in-memory.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memmap2::Mmap;

use crate::ephem::errors::{io_err, EphemError, Result};

/// Size of a DAF record in bytes
const RECORD_SIZE: usize = 1024;
/// Size of one double-precision word in bytes
const WORD_SIZE: usize = 8;
/// FTP corruption detection string carried in the file record
const FTPSTR: &[u8] = b"FTPSTR:\r:\n:\r\n:\r\x00:\x81:\x10\xce:ENDFTP";

/// DAF file byte order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    fn read_f64(self, buf: &[u8]) -> f64 {
        match self {
            Endian::Big => BigEndian::read_f64(buf),
            Endian::Little => LittleEndian::read_f64(buf),
        }
    }

    fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endian::Big => BigEndian::read_i32(buf),
            Endian::Little => LittleEndian::read_i32(buf),
        }
    }

    fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Big => BigEndian::read_u32(buf),
            Endian::Little => LittleEndian::read_u32(buf),
        }
    }
}

/// One segment descriptor from the summary/name record chain
#[derive(Debug, Clone)]
pub struct Summary {
    /// Segment name, trimmed (e.g. "DE-0440LE-0440")
    pub name: String,
    /// The ND double-precision components
    pub doubles: Vec<f64>,
    /// The NI integer components
    pub ints: Vec<i32>,
}

/// Memory-mapped Double Array File
#[derive(Debug)]
pub struct Daf {
    /// Path the file was opened from
    pub path: PathBuf,
    /// File identification word ("DAF/SPK" for planetary kernels)
    pub locidw: String,
    /// Internal file name
    pub ifname: String,
    /// Doubles per summary
    pub nd: usize,
    /// Integers per summary
    pub ni: usize,
    /// Record number of the first summary record
    pub fward: usize,
    /// Record number of the last summary record
    pub bward: usize,
    /// First free word address
    pub free: usize,
    endian: Endian,
    map: Mmap,
}

impl Daf {
    /// Open and validate a DAF file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| io_err(&path, e))?;
        // The map is read-only and the kernel file is never written while
        // loaded, which is the safety condition for Mmap::map.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| io_err(&path, e))?;

        if map.len() < RECORD_SIZE {
            return Err(EphemError::InvalidFormat(format!(
                "File too short to hold a DAF file record: {} bytes",
                map.len()
            )));
        }
        let header = &map[..RECORD_SIZE];

        let locidw = ascii_field(&header[0..8]);
        // "NAIF/DAF" is the pre-SPICE identification word still found in
        // some archived kernels
        if !locidw.starts_with("DAF/") && locidw != "NAIF/DAF" {
            return Err(EphemError::InvalidFormat(format!(
                "Bad DAF identification word: {:?}",
                locidw
            )));
        }

        // LOCFMT is plain ASCII, so it settles the byte order before any
        // integer field is decoded.
        let locfmt = ascii_field(&header[88..96]);
        let endian = match locfmt.as_str() {
            "LTL-IEEE" => Endian::Little,
            "BIG-IEEE" => Endian::Big,
            _ => {
                // Pre-FTPSTR files leave LOCFMT blank; fall back to a sanity
                // check on ND, which is a small positive count.
                let nd_little = LittleEndian::read_u32(&header[8..12]);
                if (1..=124).contains(&nd_little) {
                    Endian::Little
                } else {
                    Endian::Big
                }
            }
        };

        let ftp_area = &header[699..699 + FTPSTR.len()];
        if ftp_area.starts_with(b"FTPSTR") && ftp_area != FTPSTR {
            return Err(EphemError::InvalidFormat(
                "FTP validation string damaged; file was corrupted in transfer".to_string(),
            ));
        }

        let nd = endian.read_u32(&header[8..12]) as usize;
        let ni = endian.read_u32(&header[12..16]) as usize;
        let ifname = ascii_field(&header[16..76]);
        let fward = endian.read_u32(&header[76..80]) as usize;
        let bward = endian.read_u32(&header[80..84]) as usize;
        let free = endian.read_u32(&header[84..88]) as usize;

        if nd == 0 || ni == 0 || fward == 0 || bward == 0 {
            return Err(EphemError::InvalidFormat(format!(
                "Invalid DAF file record: nd={}, ni={}, fward={}, bward={}",
                nd, ni, fward, bward
            )));
        }

        Ok(Daf {
            path,
            locidw,
            ifname,
            nd,
            ni,
            fward,
            bward,
            free,
            endian,
            map,
        })
    }

    /// Borrow a 1024-byte record (1-indexed, per the DAF convention)
    fn record(&self, number: usize) -> Result<&[u8]> {
        if number == 0 {
            return Err(EphemError::InvalidFormat("Record numbers start at 1".to_string()));
        }
        let start = (number - 1) * RECORD_SIZE;
        let end = start + RECORD_SIZE;
        if end > self.map.len() {
            return Err(EphemError::InvalidFormat(format!(
                "Record {} lies beyond the end of {:?}",
                number, self.path
            )));
        }
        Ok(&self.map[start..end])
    }

    /// Read the inclusive word range [start, end] (1-indexed f64 addresses)
    pub fn words(&self, start: usize, end: usize) -> Result<Vec<f64>> {
        if start == 0 || end < start {
            return Err(EphemError::InvalidFormat(format!(
                "Invalid word range: {}..{}",
                start, end
            )));
        }
        let byte_start = (start - 1) * WORD_SIZE;
        let byte_end = end * WORD_SIZE;
        if byte_end > self.map.len() {
            return Err(EphemError::InvalidFormat(format!(
                "Word range {}..{} lies beyond the end of {:?}",
                start, end, self.path
            )));
        }
        let bytes = &self.map[byte_start..byte_end];
        Ok((0..end - start + 1)
            .map(|i| self.endian.read_f64(&bytes[i * WORD_SIZE..]))
            .collect())
    }

    /// Walk the summary/name record chain and collect every segment descriptor
    pub fn summaries(&self) -> Result<Vec<Summary>> {
        // Words per summary: ND doubles plus NI integers packed two per word
        let summary_words = self.nd + (self.ni + 1) / 2;
        let name_len = WORD_SIZE * summary_words;
        let max_per_record = (RECORD_SIZE / WORD_SIZE - 3) / summary_words;

        let mut out = Vec::new();
        let mut visited = HashSet::new();
        let mut record_number = self.fward;

        while record_number != 0 {
            if !visited.insert(record_number) {
                return Err(EphemError::InvalidFormat(
                    "Cycle in DAF summary record chain".to_string(),
                ));
            }
            let record = self.record(record_number)?;
            let names = self.record(record_number + 1)?;

            // Control area: NEXT, PREV, NSUM stored as doubles
            let next = self.endian.read_f64(&record[0..8]) as usize;
            let n_summaries = self.endian.read_f64(&record[16..24]) as usize;
            if n_summaries > max_per_record {
                return Err(EphemError::InvalidFormat(format!(
                    "Summary record {} claims {} summaries (limit {})",
                    record_number, n_summaries, max_per_record
                )));
            }

            for i in 0..n_summaries {
                let base = 24 + i * summary_words * WORD_SIZE;
                let doubles = (0..self.nd)
                    .map(|j| self.endian.read_f64(&record[base + j * WORD_SIZE..]))
                    .collect();
                let int_base = base + self.nd * WORD_SIZE;
                let ints = (0..self.ni)
                    .map(|j| self.endian.read_i32(&record[int_base + j * 4..]))
                    .collect();
                let name = ascii_field(&names[i * name_len..(i + 1) * name_len]);
                out.push(Summary { name, doubles, ints });
            }

            record_number = next;
        }

        Ok(out)
    }
}

/// Decode a fixed-width ASCII field, trimming padding
fn ascii_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', ' '])
        .to_string()
}
