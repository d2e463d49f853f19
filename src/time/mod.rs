//! Time module for astronomical time conversions
//!
//! Converts calendar dates into the single time standard the rest of the
//! crate computes with. Every observation entry point takes an [`Epoch`],
//! which carries Terrestrial Time (TT) as a Julian date and derives the TDB
//! seconds-past-J2000 argument that ephemeris segments are evaluated at.

use crate::constants::{DAY_S, J2000, TT_MINUS_TAI_S};
use chrono::{Datelike, NaiveDate, Timelike, Utc};
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid date format: {0:?} (expected YYYY-MM-DD)")]
    InvalidFormat(String),

    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidCalendar { year: i32, month: u32, day: u32 },
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// TAI minus UTC in seconds, keyed by the UTC Julian date the offset took
/// effect. Covers every leap second announced since the 1972 baseline.
const LEAP_SECONDS: &[(f64, f64)] = &[
    (2441317.5, 10.0), // 1972-01-01
    (2441499.5, 11.0), // 1972-07-01
    (2441683.5, 12.0), // 1973-01-01
    (2442048.5, 13.0), // 1974-01-01
    (2442413.5, 14.0), // 1975-01-01
    (2442778.5, 15.0), // 1976-01-01
    (2443144.5, 16.0), // 1977-01-01
    (2443509.5, 17.0), // 1978-01-01
    (2443874.5, 18.0), // 1979-01-01
    (2444239.5, 19.0), // 1980-01-01
    (2444786.5, 20.0), // 1981-07-01
    (2445151.5, 21.0), // 1982-07-01
    (2445516.5, 22.0), // 1983-07-01
    (2446247.5, 23.0), // 1985-07-01
    (2447161.5, 24.0), // 1988-01-01
    (2447892.5, 25.0), // 1990-01-01
    (2448257.5, 26.0), // 1991-01-01
    (2448804.5, 27.0), // 1992-07-01
    (2449169.5, 28.0), // 1993-07-01
    (2449534.5, 29.0), // 1994-07-01
    (2450083.5, 30.0), // 1996-01-01
    (2450630.5, 31.0), // 1997-07-01
    (2451179.5, 32.0), // 1999-01-01
    (2453736.5, 33.0), // 2006-01-01
    (2454832.5, 34.0), // 2009-01-01
    (2456109.5, 35.0), // 2012-07-01
    (2457204.5, 36.0), // 2015-07-01
    (2457754.5, 37.0), // 2017-01-01
];

/// Converter from calendar dates to astronomical epochs
///
/// Stateless apart from the built-in leap second table; cheap to construct
/// and to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timescale;

impl Timescale {
    pub fn new() -> Self {
        Timescale
    }

    /// Epoch for midnight UTC on the given calendar date
    pub fn utc(&self, year: i32, month: u32, day: u32) -> Result<Epoch> {
        self.utc_hms(year, month, day, 0, 0, 0.0)
    }

    /// Epoch for the given UTC calendar date and time of day
    pub fn utc_hms(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Epoch> {
        // chrono validates the calendar (month lengths, leap years) so the
        // Julian day arithmetic below never sees an impossible date.
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(TimeError::InvalidCalendar { year, month, day });
        }

        let day_fraction = (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / 24.0;
        let utc_jd = julian_day(year, month, day) as f64 - 0.5 + day_fraction;
        let tt_jd = utc_jd + (self.leap_offset(utc_jd) + TT_MINUS_TAI_S) / DAY_S;
        Ok(Epoch { tt: tt_jd })
    }

    /// Parse an ISO `YYYY-MM-DD` date string into an epoch at midnight UTC
    pub fn parse_date(&self, date: &str) -> Result<Epoch> {
        let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| TimeError::InvalidFormat(date.to_string()))?;
        self.utc(parsed.year(), parsed.month(), parsed.day())
    }

    /// Epoch for the current instant
    pub fn now(&self) -> Epoch {
        let now = Utc::now();
        let second = now.second() as f64 + now.nanosecond() as f64 / 1e9;
        // Utc::now() is always a valid calendar date
        self.utc_hms(now.year(), now.month(), now.day(), now.hour(), now.minute(), second)
            .unwrap_or(Epoch { tt: J2000 })
    }

    /// TAI minus UTC in seconds at the given UTC Julian date
    fn leap_offset(&self, utc_jd: f64) -> f64 {
        for &(jd, offset) in LEAP_SECONDS.iter().rev() {
            if utc_jd >= jd {
                return offset;
            }
        }
        0.0
    }
}

/// An instant on the astronomical timeline
///
/// Internally a Terrestrial Time Julian date. Day-granularity call sites
/// keep well within f64 precision here (sub-millisecond for modern dates).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    tt: f64,
}

impl Epoch {
    /// Construct directly from a TT Julian date
    pub const fn from_tt_jd(tt: f64) -> Self {
        Epoch { tt }
    }

    /// Terrestrial Time as a Julian date
    pub fn tt(&self) -> f64 {
        self.tt
    }

    /// Barycentric Dynamical Time as a Julian date
    pub fn tdb(&self) -> f64 {
        self.tt + tdb_minus_tt(self.tt) / DAY_S
    }

    /// TDB seconds past J2000, the evaluation argument for SPK segments
    pub fn tdb_seconds_j2000(&self) -> f64 {
        (self.tdb() - J2000) * DAY_S
    }
}

/// TDB - TT in seconds (USNO Circular 179, eq. 2.6)
fn tdb_minus_tt(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / 36525.0;

    0.001657 * f64::sin(628.3076 * t + 6.2401)
        + 0.000022 * f64::sin(575.3385 * t + 4.2970)
        + 0.000014 * f64::sin(1256.6152 * t + 6.1969)
        + 0.000005 * f64::sin(606.9777 * t + 4.0212)
        + 0.000005 * f64::sin(52.9691 * t + 0.4444)
        + 0.000002 * f64::sin(21.3299 * t + 5.5431)
        + 0.000010 * t * f64::sin(628.3076 * t + 4.2490)
}

/// Convert (year, month, day) to the Julian day number at noon
///
/// Proleptic Gregorian, following the algorithm in the Explanatory
/// Supplement to the Astronomical Almanac 15.11.
pub fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let month = month as i64;
    let day = day as i64;
    let year = year as i64;
    let janfeb = if month < 3 { 1 } else { 0 };

    1461 * (year + 4800 - janfeb) / 4 + 367 * (month - 2 + janfeb * 12) / 12
        - 3 * ((year + 4900 - janfeb) / 100) / 4
        - 32075
        + day
}

/// Convert a Julian day number back to a (year, month, day) calendar date
///
/// Inverse of [`julian_day`], same source algorithm.
pub fn calendar_date(jd: i64) -> (i32, u32, u32) {
    let f = jd + 1401 + (4 * jd + 274277) / 146097 * 3 / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Format a Julian date as a calendar date string (YYYY-MM-DD)
pub fn format_date(jd: f64) -> String {
    let (year, month, day) = calendar_date((jd + 0.5).floor() as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
