//! Static eclipse catalog
//!
//! Eclipses are not computed; they come from a finite, chronologically
//! ordered table covering 2024 through 2030. Queries past the table's end
//! yield no result rather than an error.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Eclipse classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EclipseKind {
    SolarTotal,
    SolarAnnular,
    SolarPartial,
    LunarTotal,
    LunarPartial,
    LunarPenumbral,
}

impl EclipseKind {
    /// Human-readable label for the presentation layer
    pub fn label(&self) -> &'static str {
        match self {
            EclipseKind::SolarTotal => "Total solar eclipse",
            EclipseKind::SolarAnnular => "Annular solar eclipse",
            EclipseKind::SolarPartial => "Partial solar eclipse",
            EclipseKind::LunarTotal => "Total lunar eclipse",
            EclipseKind::LunarPartial => "Partial lunar eclipse",
            EclipseKind::LunarPenumbral => "Penumbral lunar eclipse",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Eclipse {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub kind: EclipseKind,
}

impl Eclipse {
    /// The eclipse date as an ISO string
    pub fn iso_date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Solar and lunar eclipses, 2024 through 2030, chronological
const ECLIPSES: &[Eclipse] = &[
    Eclipse { year: 2024, month: 3, day: 25, kind: EclipseKind::LunarPenumbral },
    Eclipse { year: 2024, month: 4, day: 8, kind: EclipseKind::SolarTotal },
    Eclipse { year: 2024, month: 9, day: 18, kind: EclipseKind::LunarPartial },
    Eclipse { year: 2024, month: 10, day: 2, kind: EclipseKind::SolarAnnular },
    Eclipse { year: 2025, month: 3, day: 14, kind: EclipseKind::LunarTotal },
    Eclipse { year: 2025, month: 3, day: 29, kind: EclipseKind::SolarPartial },
    Eclipse { year: 2025, month: 9, day: 7, kind: EclipseKind::LunarTotal },
    Eclipse { year: 2025, month: 9, day: 21, kind: EclipseKind::SolarPartial },
    Eclipse { year: 2026, month: 2, day: 17, kind: EclipseKind::SolarAnnular },
    Eclipse { year: 2026, month: 3, day: 3, kind: EclipseKind::LunarTotal },
    Eclipse { year: 2026, month: 8, day: 12, kind: EclipseKind::SolarTotal },
    Eclipse { year: 2026, month: 8, day: 28, kind: EclipseKind::LunarPartial },
    Eclipse { year: 2027, month: 2, day: 6, kind: EclipseKind::SolarAnnular },
    Eclipse { year: 2027, month: 2, day: 20, kind: EclipseKind::LunarPenumbral },
    Eclipse { year: 2027, month: 8, day: 2, kind: EclipseKind::SolarTotal },
    Eclipse { year: 2027, month: 8, day: 17, kind: EclipseKind::LunarPenumbral },
    Eclipse { year: 2028, month: 1, day: 12, kind: EclipseKind::LunarPartial },
    Eclipse { year: 2028, month: 1, day: 26, kind: EclipseKind::SolarAnnular },
    Eclipse { year: 2028, month: 7, day: 6, kind: EclipseKind::LunarPartial },
    Eclipse { year: 2028, month: 7, day: 22, kind: EclipseKind::SolarTotal },
    Eclipse { year: 2028, month: 12, day: 31, kind: EclipseKind::LunarTotal },
    Eclipse { year: 2029, month: 1, day: 14, kind: EclipseKind::SolarPartial },
    Eclipse { year: 2029, month: 6, day: 12, kind: EclipseKind::SolarPartial },
    Eclipse { year: 2029, month: 6, day: 26, kind: EclipseKind::LunarTotal },
    Eclipse { year: 2029, month: 12, day: 5, kind: EclipseKind::SolarPartial },
    Eclipse { year: 2029, month: 12, day: 20, kind: EclipseKind::LunarTotal },
    Eclipse { year: 2030, month: 6, day: 1, kind: EclipseKind::SolarAnnular },
    Eclipse { year: 2030, month: 6, day: 15, kind: EclipseKind::LunarPartial },
    Eclipse { year: 2030, month: 11, day: 25, kind: EclipseKind::SolarTotal },
];

/// The full catalog, chronologically ordered
pub fn catalog() -> &'static [Eclipse] {
    ECLIPSES
}

/// First catalog eclipse on or after the given date
///
/// `None` once the catalog is exhausted; the table is finite and bounded by
/// design.
pub fn next_eclipse(date: NaiveDate) -> Option<&'static Eclipse> {
    let key = (date.year(), date.month(), date.day());
    ECLIPSES.iter().find(|e| (e.year, e.month, e.day) >= key)
}
