//! Observation engine
//!
//! Evaluates where one body is as seen from another at a given epoch and
//! derives the scalar observables the rest of the crate works with:
//! distances from an Earth-based site, heliocentric angles for the orbit
//! diagram, and Sun-observer-target elongations.
//!
//! Distances are observed from a geographic site on Earth's surface (the
//! original deployment observes from Vigo); heliocentric angles are always
//! observed from the Sun, never from the site.

use nalgebra::Vector3;

use crate::bodies::{self, BodyEntry, EARTH_NAIF_ID};
use crate::constants::{DEG2RAD, EARTH_RADIUS_KM, J2000, RAD2DEG};
use crate::ephem::Ephemeris;
use crate::time::Epoch;
use crate::Result;

/// A fixed observing site on Earth's surface
#[derive(Debug, Clone, Copy)]
pub struct GeoSite {
    /// Geographic latitude in degrees, north positive
    pub latitude_deg: f64,
    /// Geographic longitude in degrees, east positive
    pub longitude_deg: f64,
}

/// The deployment's default observing site (Vigo, Spain)
pub const DEFAULT_SITE: GeoSite = GeoSite {
    latitude_deg: 42.2406,
    longitude_deg: -8.7207,
};

impl GeoSite {
    /// Offset of the site from Earth's center in the equatorial frame, km
    ///
    /// A spherical-Earth model rotated by Greenwich sidereal time. The
    /// offset is bounded by one Earth radius, far below the precision that
    /// matters for planetary distances.
    fn geocentric_offset_km(&self, epoch: Epoch) -> Vector3<f64> {
        let lat = self.latitude_deg * DEG2RAD;
        let lst = gmst_rad(epoch) + self.longitude_deg * DEG2RAD;
        EARTH_RADIUS_KM * Vector3::new(lat.cos() * lst.cos(), lat.cos() * lst.sin(), lat.sin())
    }
}

/// Greenwich mean sidereal time in radians
///
/// IAU 1982 linear expression. UT1 is approximated by TT here, which moves
/// the site offset by at most a few dozen meters.
fn gmst_rad(epoch: Epoch) -> f64 {
    let days = epoch.tt() - J2000;
    (280.460_618_37 + 360.985_647_366_29 * days).rem_euclid(360.0) * DEG2RAD
}

/// Position and angle queries against a loaded ephemeris
pub struct Observer<'a> {
    ephemeris: &'a Ephemeris,
    site: GeoSite,
}

impl<'a> Observer<'a> {
    /// Observer at the default site
    pub fn new(ephemeris: &'a Ephemeris) -> Self {
        Self::with_site(ephemeris, DEFAULT_SITE)
    }

    /// Observer at a specific geographic site
    pub fn with_site(ephemeris: &'a Ephemeris, site: GeoSite) -> Self {
        Observer { ephemeris, site }
    }

    /// Position of `target` relative to `observer` in kilometers
    pub fn observe(
        &self,
        observer: &BodyEntry,
        target: &BodyEntry,
        epoch: Epoch,
    ) -> Result<Vector3<f64>> {
        let et = epoch.tdb_seconds_j2000();
        let kernel = self.ephemeris.kernel();
        Ok(kernel.position(target.naif_id, et)? - kernel.position(observer.naif_id, et)?)
    }

    /// Distance from the observing site to a body, in kilometers
    ///
    /// Earth observed from its own surface is defined as distance zero; the
    /// kernel is not consulted for that degenerate self-observation.
    pub fn distance_km(&self, target: &BodyEntry, epoch: Epoch) -> Result<f64> {
        if target.naif_id == EARTH_NAIF_ID {
            return Ok(0.0);
        }
        let from_earth = self.observe(bodies::earth(), target, epoch)?;
        Ok((from_earth - self.site.geocentric_offset_km(epoch)).norm())
    }

    /// Angular position of a body around the Sun, in radians
    ///
    /// Observed from the Sun itself (not from Earth or the site) and
    /// measured as `atan2(y, x)` of the heliocentric position, so the
    /// result lies in (-pi, pi] and wraps at the +/-pi boundary.
    pub fn heliocentric_angle_rad(&self, target: &BodyEntry, epoch: Epoch) -> Result<f64> {
        let v = self.observe(bodies::sun(), target, epoch)?;
        Ok(v.y.atan2(v.x))
    }

    /// Sun-Earth-target separation angle in degrees
    ///
    /// Returns `None` for Earth itself, where the angle is undefined.
    pub fn elongation_deg(&self, target: &BodyEntry, epoch: Epoch) -> Result<Option<f64>> {
        if target.naif_id == EARTH_NAIF_ID {
            return Ok(None);
        }
        let earth = bodies::earth();
        let to_sun = self.observe(earth, bodies::sun(), epoch)?;
        let to_target = self.observe(earth, target, epoch)?;
        let cos = to_sun.dot(&to_target) / (to_sun.norm() * to_target.norm());
        Ok(Some(cos.clamp(-1.0, 1.0).acos() * RAD2DEG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_site_offset_magnitude_is_one_earth_radius() {
        let epoch = Epoch::from_tt_jd(J2000);
        let offset = DEFAULT_SITE.geocentric_offset_km(epoch);
        assert_relative_eq!(offset.norm(), EARTH_RADIUS_KM, epsilon = 1e-6);
    }

    #[test]
    fn test_polar_site_is_all_z() {
        let pole = GeoSite {
            latitude_deg: 90.0,
            longitude_deg: 0.0,
        };
        let offset = pole.geocentric_offset_km(Epoch::from_tt_jd(J2000));
        assert_relative_eq!(offset.z, EARTH_RADIUS_KM, epsilon = 1e-6);
        assert!(offset.x.abs() < 1e-6);
        assert!(offset.y.abs() < 1e-6);
    }

    #[test]
    fn test_gmst_advances_about_361_degrees_per_day() {
        let t0 = Epoch::from_tt_jd(J2000);
        let t1 = Epoch::from_tt_jd(J2000 + 1.0);
        let delta =
            (gmst_rad(t1) - gmst_rad(t0)).rem_euclid(std::f64::consts::TAU) * RAD2DEG;
        // Sidereal day is ~3m56s shorter than a solar day
        assert_relative_eq!(delta, 0.9856, epsilon = 1e-3);
    }

    #[test]
    fn test_gmst_stays_in_range() {
        for offset in [-10_000.0, -1.5, 0.0, 0.25, 9_999.75] {
            let theta = gmst_rad(Epoch::from_tt_jd(J2000 + offset));
            assert!((0.0..std::f64::consts::TAU).contains(&theta));
        }
    }
}
