//! Presentation-boundary tests: distance and day reports over the synthetic
//! kernel, with network feeds disabled

mod common;

use orrery::report::{day_report_with, distance_report_with, ReportOptions};
use orrery::OrreryError;

fn offline_options() -> ReportOptions {
    ReportOptions {
        with_feeds: false,
        ..ReportOptions::default()
    }
}

#[test]
fn distance_report_rounds_to_integer_km() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    let report =
        distance_report_with(&ephemeris, &offline_options(), "jupiter", "2025-08-07").unwrap();

    assert_eq!(report.planet, "jupiter");
    assert_eq!(report.date, "2025-08-07");
    assert!(report.distance_km > 100_000_000 && report.distance_km < 1_000_000_000);
}

#[test]
fn distance_report_normalizes_the_identifier() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    let a = distance_report_with(&ephemeris, &offline_options(), " Mars ", "2025-08-07").unwrap();
    let b = distance_report_with(&ephemeris, &offline_options(), "mars", "2025-08-07").unwrap();
    assert_eq!(a.planet, "mars");
    assert_eq!(a.distance_km, b.distance_km);
}

#[test]
fn unknown_planet_is_a_distinguished_error() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    let err = distance_report_with(&ephemeris, &offline_options(), "vulcan", "2025-08-07")
        .unwrap_err();
    match err {
        OrreryError::UnknownBody(name) => assert_eq!(name, "vulcan"),
        other => panic!("expected UnknownBody, got {:?}", other),
    }
}

#[test]
fn malformed_dates_are_rejected_as_invalid_date() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    for bad in ["07-08-2025", "2025-02-30", "soon"] {
        let err = distance_report_with(&ephemeris, &offline_options(), "mars", bad).unwrap_err();
        assert!(
            matches!(err, OrreryError::InvalidDate(_)),
            "{:?} for input {:?}",
            err,
            bad
        );
    }
}

#[test]
fn day_report_covers_orbit_facts_and_events() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    let report = day_report_with(&ephemeris, &offline_options(), "2025-08-07").unwrap();

    assert_eq!(report.date, "2025-08-07");

    // Orbit snapshot: the fixed eight planets in order, radii on the
    // geometric layout with Neptune filling the drawable extent
    assert_eq!(report.orbit.entries.len(), 8);
    assert_eq!(report.orbit.entries[0].id, "mercury");
    assert_eq!(report.orbit.entries[7].id, "neptune");
    assert_eq!(report.orbit.entries[7].radius, 760);
    for pair in report.orbit.entries.windows(2) {
        assert!(pair[0].radius < pair[1].radius);
    }

    // Facts for all nine listed planets
    assert_eq!(report.planets.len(), 9);
    let earth = report.planets.iter().find(|p| p.id == "earth").unwrap();
    assert_eq!(earth.elongation_deg, None);
    assert_eq!(earth.moon_count, 1);

    // Static-catalog events resolve; feed-backed fields stay absent offline
    let eclipse = report.events.eclipse.unwrap();
    assert_eq!(eclipse.iso_date(), "2025-09-07");
    let shower = report.events.meteor_shower.unwrap();
    assert_eq!(shower.shower.name, "Perseids");
    assert!(report.events.brightest_comet.is_none());
    assert!(report.events.space_weather.is_none());
    assert!(!report.events.visible_planets.unwrap().is_empty());
}

#[test]
fn day_report_serializes_for_the_web_layer() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    let report = day_report_with(&ephemeris, &offline_options(), "2025-08-07").unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["date"], "2025-08-07");
    assert_eq!(json["orbit"]["entries"][7]["radius"], 760);
    assert!(json["events"]["brightest_comet"].is_null());
    assert_eq!(json["planets"].as_array().unwrap().len(), 9);
}

#[test]
fn day_report_past_catalog_end_has_no_eclipse() {
    let (_dir, ephemeris) = common::standard_ephemeris();
    let report = day_report_with(&ephemeris, &offline_options(), "2031-06-01").unwrap();
    assert!(report.events.eclipse.is_none());
    // The meteor table recurs annually, so a shower is always upcoming
    assert!(report.events.meteor_shower.is_some());
}
