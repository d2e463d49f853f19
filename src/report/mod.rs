//! Structured results for the presentation layer
//!
//! The web front end consumes exactly two shapes: a single-planet distance
//! answer, and the full day report (orbit snapshot, per-planet facts and
//! derived metrics, upcoming sky events), both keyed by an ISO date string.
//! Computation failures surface as typed errors; feed failures surface as
//! absent fields inside an otherwise complete report.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::almanac::{self, eclipses, showers, VisiblePlanet};
use crate::bodies::{self, LISTED_PLANETS, ORBIT_PLANETS};
use crate::ephem::{self, Ephemeris};
use crate::feeds::{self, CometCandidate, SpaceWeather};
use crate::observe::{GeoSite, Observer, DEFAULT_SITE};
use crate::orbit::{self, OrbitLayout, OrbitSnapshot};
use crate::time::Epoch;
use crate::{OrreryError, Result};

/// Distance answer for one planet on one date
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    pub planet: &'static str,
    pub date: String,
    /// Kilometers from the observing site, rounded to the nearest integer
    pub distance_km: i64,
}

/// Facts and derived metrics for one planet on the report date
#[derive(Debug, Clone, Serialize)]
pub struct PlanetSummary {
    pub id: &'static str,
    pub rotation_period_hours: f64,
    pub orbital_period_days: Option<f64>,
    pub mean_temperature_c: f64,
    pub surface_gravity_ms2: f64,
    pub atmosphere: &'static str,
    pub moon_count: u32,
    /// Fraction of the body's year elapsed since the reference epoch
    pub year_progress: f64,
    pub earth_day_of_year: Option<u32>,
    pub local_day_of_year: Option<u32>,
    /// Sun separation as seen from Earth; absent for Earth itself
    pub elongation_deg: Option<f64>,
}

/// Upcoming sky events; every field is independently optional
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpcomingEvents {
    pub eclipse: Option<&'static eclipses::Eclipse>,
    pub meteor_shower: Option<showers::ShowerEvent>,
    pub brightest_comet: Option<CometCandidate>,
    pub visible_planets: Option<Vec<VisiblePlanet>>,
    pub space_weather: Option<SpaceWeather>,
}

/// Everything the day page renders from
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    /// ISO `YYYY-MM-DD` key for the report
    pub date: String,
    pub orbit: OrbitSnapshot,
    pub planets: Vec<PlanetSummary>,
    pub events: UpcomingEvents,
}

/// Knobs for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub layout: OrbitLayout,
    pub site: GeoSite,
    /// When false, the network feeds are skipped and their fields stay
    /// absent (useful offline and in tests)
    pub with_feeds: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            layout: OrbitLayout::default(),
            site: DEFAULT_SITE,
            with_feeds: true,
        }
    }
}

fn parse_iso_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| OrreryError::InvalidDate(date.to_string()))
}

fn epoch_for(ephemeris: &Ephemeris, date: NaiveDate) -> Result<Epoch> {
    Ok(ephemeris
        .timescale()
        .utc(date.year(), date.month(), date.day())?)
}

/// Distance report against an explicitly provided ephemeris
pub fn distance_report_with(
    ephemeris: &Ephemeris,
    options: &ReportOptions,
    planet_id: &str,
    date: &str,
) -> Result<DistanceReport> {
    let entry = bodies::resolve(planet_id)?;
    let day = parse_iso_date(date)?;
    let epoch = epoch_for(ephemeris, day)?;
    let observer = Observer::with_site(ephemeris, options.site);

    let km = observer.distance_km(entry, epoch)?;
    Ok(DistanceReport {
        planet: entry.id,
        date: day.format("%Y-%m-%d").to_string(),
        distance_km: km.round() as i64,
    })
}

/// Day report against an explicitly provided ephemeris
pub fn day_report_with(
    ephemeris: &Ephemeris,
    options: &ReportOptions,
    date: &str,
) -> Result<DayReport> {
    let day = parse_iso_date(date)?;
    let epoch = epoch_for(ephemeris, day)?;
    let observer = Observer::with_site(ephemeris, options.site);

    let snapshot = orbit::compose_orbit(&observer, &options.layout, ORBIT_PLANETS, epoch)?;

    let mut planets = Vec::with_capacity(LISTED_PLANETS.len());
    for id in LISTED_PLANETS {
        let entry = bodies::resolve(id)?;
        let progress = almanac::year_progress(&observer, entry, epoch)?;
        planets.push(PlanetSummary {
            id: entry.id,
            rotation_period_hours: entry.facts.rotation_period_hours,
            orbital_period_days: entry.facts.orbital_period_days,
            mean_temperature_c: entry.facts.mean_temperature_c,
            surface_gravity_ms2: entry.facts.surface_gravity_ms2,
            atmosphere: entry.facts.atmosphere,
            moon_count: entry.facts.moon_count,
            year_progress: progress,
            earth_day_of_year: almanac::earth_day_of_year(progress, entry),
            local_day_of_year: almanac::local_day_of_year(progress, entry),
            elongation_deg: observer.elongation_deg(entry, epoch)?,
        });
    }

    Ok(DayReport {
        date: day.format("%Y-%m-%d").to_string(),
        orbit: snapshot,
        planets,
        events: upcoming_events(&observer, day, epoch, options.with_feeds),
    })
}

/// Assemble the events block; nothing here is allowed to fail the report
pub fn upcoming_events(
    observer: &Observer,
    date: NaiveDate,
    epoch: Epoch,
    with_feeds: bool,
) -> UpcomingEvents {
    let visible_planets = match almanac::visible_planets(observer, epoch) {
        Ok(list) => Some(list),
        Err(err) => {
            log::warn!("Visible-planet classification unavailable: {}", err);
            None
        }
    };

    UpcomingEvents {
        eclipse: eclipses::next_eclipse(date),
        meteor_shower: showers::next_shower(date),
        brightest_comet: with_feeds.then(feeds::brightest_comet).flatten(),
        visible_planets,
        space_weather: with_feeds.then(feeds::space_weather).flatten(),
    }
}

/// Distance report using the process-wide ephemeris
pub fn distance_report(planet_id: &str, date: &str) -> Result<DistanceReport> {
    let ephemeris = ephem::get_ephemeris()?;
    distance_report_with(&ephemeris, &ReportOptions::default(), planet_id, date)
}

/// Day report using the process-wide ephemeris
pub fn day_report(date: &str) -> Result<DayReport> {
    let ephemeris = ephem::get_ephemeris()?;
    day_report_with(&ephemeris, &ReportOptions::default(), date)
}
