//! Orbit-diagram geometry
//!
//! Lays out the animated orbit diagram: each planet gets a display radius
//! from a geometric progression scaled to fit the drawable extent, and its
//! real heliocentric angle at the requested epoch. The radii are pure
//! visualization; they carry no distance information.

use serde::Serialize;

use crate::bodies;
use crate::observe::Observer;
use crate::time::Epoch;
use crate::Result;

/// Radius progression and drawable extent for the diagram
#[derive(Debug, Clone, Copy)]
pub struct OrbitLayout {
    /// Innermost raw radius before scaling
    pub base: f64,
    /// Ratio between adjacent orbits
    pub growth: f64,
    /// Width of the square drawing area, in pixels
    pub display_extent: f64,
    /// Gap kept free at the outer edge, in pixels
    pub margin: f64,
}

impl Default for OrbitLayout {
    fn default() -> Self {
        OrbitLayout {
            base: 60.0,
            growth: 1.35,
            display_extent: 800.0,
            margin: 40.0,
        }
    }
}

impl OrbitLayout {
    /// Display radii for `count` orbits
    ///
    /// The progression is normalized so the outermost orbit lands exactly at
    /// `display_extent - margin` (before rounding) however many orbits are
    /// drawn; inner radii follow the geometric ratio.
    pub fn radii(&self, count: usize) -> Vec<u32> {
        if count == 0 {
            return Vec::new();
        }
        let outermost = self.base * self.growth.powi(count as i32 - 1);
        let scale = (self.display_extent - self.margin) / outermost;
        (0..count)
            .map(|i| (self.base * self.growth.powi(i as i32) * scale).round() as u32)
            .collect()
    }
}

/// One planet's place on the diagram
#[derive(Debug, Clone, Serialize)]
pub struct OrbitEntry {
    /// Canonical planet identifier
    pub id: &'static str,
    /// Display radius in pixels
    pub radius: u32,
    /// Heliocentric angle in radians, range (-pi, pi]
    pub angle_rad: f64,
    /// Orbital period in Earth days, for the front-end animation speed
    pub period_days: Option<f64>,
}

/// All planets' places on the diagram at one epoch, in orbit order
#[derive(Debug, Clone, Serialize)]
pub struct OrbitSnapshot {
    pub entries: Vec<OrbitEntry>,
}

/// Compose the diagram for an ordered planet list at the given epoch
///
/// Angles come from the real heliocentric positions; radii from the layout.
/// Successive snapshots are independent: angles near the +/-pi boundary wrap
/// rather than unwinding continuously.
pub fn compose_orbit(
    observer: &Observer,
    layout: &OrbitLayout,
    planets: &[&str],
    epoch: Epoch,
) -> Result<OrbitSnapshot> {
    let radii = layout.radii(planets.len());
    let mut entries = Vec::with_capacity(planets.len());

    for (id, radius) in planets.iter().zip(radii) {
        let entry = bodies::resolve(id)?;
        entries.push(OrbitEntry {
            id: entry.id,
            radius,
            angle_rad: observer.heliocentric_angle_rad(entry, epoch)?,
            period_days: entry.facts.orbital_period_days,
        });
    }

    Ok(OrbitSnapshot { entries })
}
