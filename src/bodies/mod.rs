//! Solar-system body registry
//!
//! Maps user-facing planet identifiers to ephemeris lookup keys and NAIF
//! integer ids, and carries the static physical facts shown on the planet
//! pages. The registry is fixed at compile time; there is no runtime
//! creation or deletion of bodies.
//!
//! Planets whose kernel entry is the planet-moon barycenter (Mars outward)
//! resolve to "<name> barycenter". Mercury, Venus, Earth and the Sun are
//! looked up directly.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::{OrreryError, Result};

/// Static physical facts for one body
#[derive(Debug, Clone, Copy)]
pub struct BodyFacts {
    /// Sidereal rotation period in hours
    pub rotation_period_hours: f64,
    /// Orbital period in Earth days; `None` for the Sun
    pub orbital_period_days: Option<f64>,
    /// Mean temperature in degrees Celsius
    pub mean_temperature_c: f64,
    /// Surface gravity in m/s^2
    pub surface_gravity_ms2: f64,
    /// One-line atmosphere description
    pub atmosphere: &'static str,
    /// Number of known moons
    pub moon_count: u32,
}

/// One entry in the body registry
#[derive(Debug, Clone, Copy)]
pub struct BodyEntry {
    /// Canonical lowercase identifier ("mars")
    pub id: &'static str,
    /// Key the ephemeris is queried with ("mars barycenter")
    pub ephemeris_key: &'static str,
    /// NAIF integer id of the ephemeris target
    pub naif_id: i32,
    /// Static physical facts
    pub facts: BodyFacts,
}

/// NAIF id of the Sun, the observer for heliocentric angles
pub const SUN_NAIF_ID: i32 = 10;
/// NAIF id of Earth (the planet itself, not the Earth-Moon barycenter)
pub const EARTH_NAIF_ID: i32 = 399;

/// The eight planets drawn on the orbit diagram, in orbit order
pub const ORBIT_PLANETS: &[&str] = &[
    "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
];

/// Every body a distance page can be requested for
pub const LISTED_PLANETS: &[&str] = &[
    "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto",
];

/// The full registry, orbit order then Pluto and the Sun
///
/// Facts are from the NASA planetary fact sheets; rotation periods are
/// sidereal and unsigned (Venus and Uranus rotate retrograde).
const BODIES: &[BodyEntry] = &[
    BodyEntry {
        id: "mercury",
        ephemeris_key: "mercury",
        naif_id: 199,
        facts: BodyFacts {
            rotation_period_hours: 1407.6,
            orbital_period_days: Some(88.0),
            mean_temperature_c: 167.0,
            surface_gravity_ms2: 3.7,
            atmosphere: "Thin exosphere of sodium and potassium",
            moon_count: 0,
        },
    },
    BodyEntry {
        id: "venus",
        ephemeris_key: "venus",
        naif_id: 299,
        facts: BodyFacts {
            rotation_period_hours: 5832.5,
            orbital_period_days: Some(224.7),
            mean_temperature_c: 464.0,
            surface_gravity_ms2: 8.9,
            atmosphere: "Dense carbon dioxide with sulfuric acid clouds",
            moon_count: 0,
        },
    },
    BodyEntry {
        id: "earth",
        ephemeris_key: "earth",
        naif_id: 399,
        facts: BodyFacts {
            rotation_period_hours: 23.9,
            orbital_period_days: Some(365.2),
            mean_temperature_c: 15.0,
            surface_gravity_ms2: 9.8,
            atmosphere: "Nitrogen and oxygen",
            moon_count: 1,
        },
    },
    BodyEntry {
        id: "mars",
        ephemeris_key: "mars barycenter",
        naif_id: 4,
        facts: BodyFacts {
            rotation_period_hours: 24.7,
            orbital_period_days: Some(687.0),
            mean_temperature_c: -65.0,
            surface_gravity_ms2: 3.7,
            atmosphere: "Thin carbon dioxide",
            moon_count: 2,
        },
    },
    BodyEntry {
        id: "jupiter",
        ephemeris_key: "jupiter barycenter",
        naif_id: 5,
        facts: BodyFacts {
            rotation_period_hours: 9.9,
            orbital_period_days: Some(4331.0),
            mean_temperature_c: -110.0,
            surface_gravity_ms2: 23.1,
            atmosphere: "Hydrogen and helium",
            moon_count: 95,
        },
    },
    BodyEntry {
        id: "saturn",
        ephemeris_key: "saturn barycenter",
        naif_id: 6,
        facts: BodyFacts {
            rotation_period_hours: 10.7,
            orbital_period_days: Some(10_747.0),
            mean_temperature_c: -140.0,
            surface_gravity_ms2: 9.0,
            atmosphere: "Hydrogen and helium",
            moon_count: 146,
        },
    },
    BodyEntry {
        id: "uranus",
        ephemeris_key: "uranus barycenter",
        naif_id: 7,
        facts: BodyFacts {
            rotation_period_hours: 17.2,
            orbital_period_days: Some(30_589.0),
            mean_temperature_c: -195.0,
            surface_gravity_ms2: 8.7,
            atmosphere: "Hydrogen, helium and methane",
            moon_count: 28,
        },
    },
    BodyEntry {
        id: "neptune",
        ephemeris_key: "neptune barycenter",
        naif_id: 8,
        facts: BodyFacts {
            rotation_period_hours: 16.1,
            orbital_period_days: Some(59_800.0),
            mean_temperature_c: -200.0,
            surface_gravity_ms2: 11.0,
            atmosphere: "Hydrogen, helium and methane",
            moon_count: 16,
        },
    },
    BodyEntry {
        id: "pluto",
        ephemeris_key: "pluto barycenter",
        naif_id: 9,
        facts: BodyFacts {
            rotation_period_hours: 153.3,
            orbital_period_days: Some(90_560.0),
            mean_temperature_c: -225.0,
            surface_gravity_ms2: 0.7,
            atmosphere: "Thin nitrogen and methane",
            moon_count: 5,
        },
    },
    BodyEntry {
        id: "sun",
        ephemeris_key: "sun",
        naif_id: SUN_NAIF_ID,
        facts: BodyFacts {
            rotation_period_hours: 609.1,
            orbital_period_days: None,
            mean_temperature_c: 5505.0,
            surface_gravity_ms2: 274.0,
            atmosphere: "Hydrogen and helium plasma",
            moon_count: 0,
        },
    },
];

lazy_static! {
    /// Map from canonical identifier to registry entry
    static ref BY_ID: HashMap<&'static str, &'static BodyEntry> =
        BODIES.iter().map(|entry| (entry.id, entry)).collect();
}

/// The Sun's registry entry
pub fn sun() -> &'static BodyEntry {
    &BODIES[9]
}

/// Earth's registry entry
pub fn earth() -> &'static BodyEntry {
    &BODIES[2]
}

/// Resolve a user-facing planet identifier to its registry entry
///
/// Input is case- and whitespace-normalized. Unrecognized identifiers fail
/// with [`OrreryError::UnknownBody`], which callers must be able to tell
/// apart from every other failure.
pub fn resolve(planet_id: &str) -> Result<&'static BodyEntry> {
    let normalized = planet_id.trim().to_lowercase();
    BY_ID
        .get(normalized.as_str())
        .copied()
        .ok_or(OrreryError::UnknownBody(normalized))
}
