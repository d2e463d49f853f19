//! Annual meteor shower table
//!
//! Major showers recur on (nearly) fixed calendar dates, so the "next
//! shower" question is date arithmetic over a static table: take each
//! shower's peak this year, roll it to next year if it has already passed,
//! and keep the chronologically nearest. When two candidates land on the
//! same date the earlier table entry wins; that tie-break is an artifact of
//! table order, pinned here but not otherwise meaningful.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One shower's annual peak
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MeteorShower {
    pub name: &'static str,
    pub month: u32,
    pub day: u32,
}

/// A shower together with its next concrete peak date
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShowerEvent {
    pub shower: MeteorShower,
    pub date: NaiveDate,
}

/// Major annual showers with their usual peak dates
const SHOWERS: &[MeteorShower] = &[
    MeteorShower { name: "Quadrantids", month: 1, day: 3 },
    MeteorShower { name: "Lyrids", month: 4, day: 22 },
    MeteorShower { name: "Eta Aquariids", month: 5, day: 6 },
    MeteorShower { name: "Delta Aquariids", month: 7, day: 30 },
    MeteorShower { name: "Perseids", month: 8, day: 12 },
    MeteorShower { name: "Orionids", month: 10, day: 21 },
    MeteorShower { name: "Leonids", month: 11, day: 17 },
    MeteorShower { name: "Geminids", month: 12, day: 14 },
    MeteorShower { name: "Ursids", month: 12, day: 22 },
];

/// The full annual table, in peak-date order
pub fn table() -> &'static [MeteorShower] {
    SHOWERS
}

/// The shower's next peak on or after the given date
pub fn next_occurrence(shower: &MeteorShower, date: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(date.year(), shower.month, shower.day)?;
    if this_year >= date {
        Some(this_year)
    } else {
        NaiveDate::from_ymd_opt(date.year() + 1, shower.month, shower.day)
    }
}

fn next_shower_in(table: &[MeteorShower], date: NaiveDate) -> Option<ShowerEvent> {
    let mut best: Option<ShowerEvent> = None;
    for shower in table {
        let Some(candidate) = next_occurrence(shower, date) else {
            continue;
        };
        let closer = match &best {
            None => true,
            // Strictly closer replaces; an equal date keeps the earlier entry
            Some(current) => candidate < current.date,
        };
        if closer {
            best = Some(ShowerEvent {
                shower: *shower,
                date: candidate,
            });
        }
    }
    best
}

/// The chronologically nearest upcoming shower peak
pub fn next_shower(date: NaiveDate) -> Option<ShowerEvent> {
    next_shower_in(SHOWERS, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_passed_peak_rolls_to_next_year() {
        let quadrantids = &SHOWERS[0];
        assert_eq!(
            next_occurrence(quadrantids, date(2025, 1, 4)),
            Some(date(2026, 1, 3))
        );
    }

    #[test]
    fn test_peak_day_itself_counts_as_upcoming() {
        let quadrantids = &SHOWERS[0];
        assert_eq!(
            next_occurrence(quadrantids, date(2025, 1, 3)),
            Some(date(2025, 1, 3))
        );
    }

    #[test]
    fn test_just_after_quadrantids_the_lyrids_are_nearest() {
        // The passed Quadrantids roll a full year out, so they must not win
        let event = next_shower(date(2025, 1, 4)).unwrap();
        assert_eq!(event.shower.name, "Lyrids");
        assert_eq!(event.date, date(2025, 4, 22));
    }

    #[test]
    fn test_late_december_wraps_into_january() {
        let event = next_shower(date(2025, 12, 23)).unwrap();
        assert_eq!(event.shower.name, "Quadrantids");
        assert_eq!(event.date, date(2026, 1, 3));
    }

    #[test]
    fn test_midsummer_picks_delta_aquariids() {
        let event = next_shower(date(2025, 7, 1)).unwrap();
        assert_eq!(event.shower.name, "Delta Aquariids");
    }

    #[test]
    fn test_equal_dates_keep_the_earlier_table_entry() {
        let table = [
            MeteorShower { name: "First", month: 6, day: 10 },
            MeteorShower { name: "Second", month: 6, day: 10 },
        ];
        let event = next_shower_in(&table, date(2025, 6, 1)).unwrap();
        assert_eq!(event.shower.name, "First");
    }
}
