//! Derived observables
//!
//! Orbital phase progress, per-body day-of-year conversions, and the
//! visible-planet classification, plus the static eclipse and meteor-shower
//! catalogs in the submodules.

pub mod eclipses;
pub mod showers;

use serde::Serialize;

use crate::bodies::{self, BodyEntry, EARTH_NAIF_ID};
use crate::constants::{J2000, TAU};
use crate::observe::Observer;
use crate::time::Epoch;
use crate::Result;

/// Elongation at or above which a planet is classified as visible, degrees.
/// Fixed threshold inherited from the original deployment; no derivation is
/// documented for it.
pub const VISIBLE_ELONGATION_DEG: f64 = 30.0;

/// Reference epoch that orbital phase progress is measured from (J2000 TT)
pub const REFERENCE_EPOCH: Epoch = Epoch::from_tt_jd(J2000);

/// Fraction of an orbit completed between two heliocentric angles
fn phase_fraction(angle_now: f64, angle_reference: f64) -> f64 {
    (angle_now - angle_reference).rem_euclid(TAU) / TAU
}

/// Fraction of the body's orbital period elapsed since the reference epoch,
/// in [0, 1)
///
/// Bodies with no orbital period (the Sun) are 0 by convention; the
/// ephemeris is not consulted for them.
pub fn year_progress(observer: &Observer, target: &BodyEntry, epoch: Epoch) -> Result<f64> {
    if target.facts.orbital_period_days.is_none() {
        return Ok(0.0);
    }
    let now = observer.heliocentric_angle_rad(target, epoch)?;
    let reference = observer.heliocentric_angle_rad(target, REFERENCE_EPOCH)?;
    Ok(phase_fraction(now, reference))
}

/// 1-based day of the body's year, counted in Earth days
pub fn earth_day_of_year(progress: f64, target: &BodyEntry) -> Option<u32> {
    let period = target.facts.orbital_period_days?;
    Some((progress * period).floor() as u32 + 1)
}

/// 1-based day of the body's year, counted in the body's own solar days
pub fn local_day_of_year(progress: f64, target: &BodyEntry) -> Option<u32> {
    let period = target.facts.orbital_period_days?;
    let local_days = period * 24.0 / target.facts.rotation_period_hours;
    Some((progress * local_days).floor() as u32 + 1)
}

/// A planet currently far enough from the Sun to be observable
#[derive(Debug, Clone, Serialize)]
pub struct VisiblePlanet {
    pub id: &'static str,
    pub elongation_deg: f64,
}

/// Planets whose elongation clears the visibility threshold
///
/// Earth never appears; its elongation from itself is undefined.
pub fn visible_planets(observer: &Observer, epoch: Epoch) -> Result<Vec<VisiblePlanet>> {
    let mut visible = Vec::new();
    for id in bodies::ORBIT_PLANETS {
        let entry = bodies::resolve(id)?;
        if entry.naif_id == EARTH_NAIF_ID {
            continue;
        }
        if let Some(elongation_deg) = observer.elongation_deg(entry, epoch)? {
            if elongation_deg >= VISIBLE_ELONGATION_DEG {
                visible.push(VisiblePlanet {
                    id: entry.id,
                    elongation_deg,
                });
            }
        }
    }
    Ok(visible)
}
