//! Best-effort external data feeds
//!
//! Comet visibility and space-weather data come from third-party services
//! whose availability and response shapes are outside our control. Every
//! lookup here is bounded by a timeout and degrades to "feature absent"
//! (`None`) on any failure; nothing in this module can abort a page.
//!
//! Response parsing is deliberately opportunistic: each feed has an ordered
//! list of adapter functions, one per known response shape, tried in
//! sequence with the first match winning.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Cap on every outbound feed request
pub const FEED_TIMEOUT: Duration = Duration::from_secs(5);

/// Below this many parsed comet candidates the static fallback list is used
pub const MIN_COMET_CANDIDATES: usize = 3;

/// Planetary K-index at or above which conditions count as a geomagnetic
/// storm. Fixed threshold inherited from the original deployment.
pub const KP_STORM_THRESHOLD: f64 = 5.0;

/// Comet observation database queried for currently-observable comets
pub const COMET_FEED_URL: &str = "https://cobs.si/api/comet_list.api";

/// NOAA SWPC planetary K-index product
pub const KP_INDEX_FEED_URL: &str =
    "https://services.swpc.noaa.gov/products/noaa-planetary-k-index.json";

/// Error type for feed lookups; never escapes the module boundary as
/// anything but an absent feature
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Service returned HTTP status {0}")]
    Status(u16),

    #[error("Response was not valid JSON: {0}")]
    Parse(String),
}

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Fetch and parse a JSON document with an explicit timeout
pub fn fetch_json(url: &str, timeout: Duration) -> Result<Value> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FeedError::Request(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| FeedError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FeedError::Status(response.status().as_u16()));
    }

    response.json().map_err(|e| FeedError::Parse(e.to_string()))
}

/// One observable comet from the feed (or the fallback list)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CometCandidate {
    pub name: String,
    /// Visual magnitude; lower is brighter
    pub magnitude: Option<f64>,
}

/// Well-known periodic comets substituted when the live feed fails or
/// returns too few candidates. Magnitudes are rough historical values; the
/// list exists so the page section renders something sensible, not as a
/// current-sky claim.
fn fallback_comets() -> Vec<CometCandidate> {
    [
        ("2P/Encke", 10.5),
        ("12P/Pons-Brooks", 9.0),
        ("19P/Borrelly", 11.2),
        ("67P/Churyumov-Gerasimenko", 12.0),
        ("103P/Hartley", 11.5),
    ]
    .into_iter()
    .map(|(name, magnitude)| CometCandidate {
        name: name.to_string(),
        magnitude: Some(magnitude),
    })
    .collect()
}

/// Pick a comet name out of a JSON object, whatever the service called it
fn object_name(object: &Value) -> Option<String> {
    ["name", "designation", "comet", "object_name"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Pick a magnitude out of a JSON object; services send numbers or strings
fn object_magnitude(object: &Value) -> Option<f64> {
    ["mag", "magnitude", "current_mag", "m1"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
}

fn candidate_from_object(object: &Value) -> Option<CometCandidate> {
    Some(CometCandidate {
        name: object_name(object)?,
        magnitude: object_magnitude(object),
    })
}

/// Shape: `{"objects": [...]}` or `{"comets": [...]}` wrapping a list
fn comets_from_wrapped_list(value: &Value) -> Option<Vec<CometCandidate>> {
    let list = ["objects", "comets", "list"]
        .iter()
        .find_map(|key| value.get(*key))?
        .as_array()?;
    Some(list.iter().filter_map(candidate_from_object).collect())
}

/// Shape: a bare top-level array of comet objects
fn comets_from_bare_array(value: &Value) -> Option<Vec<CometCandidate>> {
    let list = value.as_array()?;
    let parsed: Vec<_> = list.iter().filter_map(candidate_from_object).collect();
    // An array that yields no objects is some other shape, not a match
    (!parsed.is_empty() || list.is_empty()).then_some(parsed)
}

/// Known comet response shapes, in the order they are attempted
const COMET_ADAPTERS: &[fn(&Value) -> Option<Vec<CometCandidate>>] =
    &[comets_from_wrapped_list, comets_from_bare_array];

/// Parse comet candidates from a feed response, first matching shape wins
pub fn comet_candidates(value: &Value) -> Option<Vec<CometCandidate>> {
    COMET_ADAPTERS.iter().find_map(|adapter| adapter(value))
}

/// The brightest currently-observable comet, best effort
///
/// Falls back to the static list when the feed fails, parses to an unknown
/// shape, or yields fewer than [`MIN_COMET_CANDIDATES`] candidates.
pub fn brightest_comet() -> Option<CometCandidate> {
    let fetched = match fetch_json(COMET_FEED_URL, FEED_TIMEOUT) {
        Ok(value) => comet_candidates(&value).unwrap_or_default(),
        Err(err) => {
            log::warn!("Comet feed unavailable: {}", err);
            Vec::new()
        }
    };

    let candidates = if fetched.len() < MIN_COMET_CANDIDATES {
        log::debug!(
            "Comet feed returned {} candidates; using fallback list",
            fetched.len()
        );
        fallback_comets()
    } else {
        fetched
    };

    brightest_of(candidates)
}

/// Lowest-magnitude candidate; unknown magnitudes sort last
fn brightest_of(candidates: Vec<CometCandidate>) -> Option<CometCandidate> {
    candidates.into_iter().min_by(|a, b| {
        let ka = a.magnitude.unwrap_or(f64::INFINITY);
        let kb = b.magnitude.unwrap_or(f64::INFINITY);
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Current geomagnetic conditions
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpaceWeather {
    /// Latest planetary K-index
    pub kp_index: f64,
    /// Whether the index reaches [`KP_STORM_THRESHOLD`]
    pub storm: bool,
}

/// Shape: SWPC "products" table, `[[header...], [row...], ...]` with Kp as
/// a string column
fn kp_from_product_table(value: &Value) -> Option<f64> {
    let rows = value.as_array()?;
    let header = rows.first()?.as_array()?;
    let kp_column = header
        .iter()
        .position(|cell| cell.as_str().is_some_and(|s| s.eq_ignore_ascii_case("kp")))?;
    let last = rows.last()?.as_array()?;
    let cell = last.get(kp_column)?;
    cell.as_f64()
        .or_else(|| cell.as_str()?.trim().parse().ok())
}

/// Shape: SWPC JSON list of observations with a `kp_index` field
fn kp_from_observation_list(value: &Value) -> Option<f64> {
    let last = value.as_array()?.last()?;
    ["kp_index", "estimated_kp", "kp"]
        .iter()
        .find_map(|key| last.get(*key))
        .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
}

/// Known K-index response shapes, in the order they are attempted
const KP_ADAPTERS: &[fn(&Value) -> Option<f64>] = &[kp_from_product_table, kp_from_observation_list];

/// Parse the latest planetary K-index from a feed response
pub fn kp_from_feed(value: &Value) -> Option<f64> {
    KP_ADAPTERS.iter().find_map(|adapter| adapter(value))
}

/// Latest space-weather reading, best effort
pub fn space_weather() -> Option<SpaceWeather> {
    match fetch_json(KP_INDEX_FEED_URL, FEED_TIMEOUT) {
        Ok(value) => kp_from_feed(&value).map(|kp_index| SpaceWeather {
            kp_index,
            storm: kp_index >= KP_STORM_THRESHOLD,
        }),
        Err(err) => {
            log::warn!("Space weather feed unavailable: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_list_shape() {
        let value = json!({
            "objects": [
                {"name": "C/2025 K1", "mag": 8.2},
                {"name": "12P/Pons-Brooks", "mag": "9.5"},
            ]
        });
        let comets = comet_candidates(&value).unwrap();
        assert_eq!(comets.len(), 2);
        assert_eq!(comets[0].name, "C/2025 K1");
        assert_eq!(comets[1].magnitude, Some(9.5));
    }

    #[test]
    fn test_bare_array_shape_with_alternate_keys() {
        let value = json!([
            {"designation": "2P/Encke", "magnitude": 10.1},
            {"designation": "C/2024 G3", "current_mag": "4.0"},
        ]);
        let comets = comet_candidates(&value).unwrap();
        assert_eq!(comets[1].name, "C/2024 G3");
        assert_eq!(comets[1].magnitude, Some(4.0));
    }

    #[test]
    fn test_unrecognized_shape_is_none() {
        assert!(comet_candidates(&json!({"status": "maintenance"})).is_none());
        assert!(comet_candidates(&json!(42)).is_none());
    }

    #[test]
    fn test_objects_missing_names_are_skipped() {
        let value = json!({"objects": [{"mag": 7.0}, {"name": "C/2025 A1"}]});
        let comets = comet_candidates(&value).unwrap();
        assert_eq!(comets.len(), 1);
        assert_eq!(comets[0].magnitude, None);
    }

    #[test]
    fn test_brightest_prefers_lowest_magnitude() {
        let brightest = brightest_of(vec![
            CometCandidate { name: "dim".into(), magnitude: Some(12.0) },
            CometCandidate { name: "bright".into(), magnitude: Some(3.5) },
            CometCandidate { name: "unknown".into(), magnitude: None },
        ])
        .unwrap();
        assert_eq!(brightest.name, "bright");
    }

    #[test]
    fn test_fallback_list_satisfies_minimum() {
        assert!(fallback_comets().len() >= MIN_COMET_CANDIDATES);
    }

    #[test]
    fn test_kp_from_product_table() {
        let value = json!([
            ["time_tag", "Kp", "a_running", "station_count"],
            ["2025-08-06 21:00:00", "3.33", "18", "8"],
            ["2025-08-07 00:00:00", "5.67", "60", "8"],
        ]);
        assert_eq!(kp_from_feed(&value), Some(5.67));
    }

    #[test]
    fn test_kp_from_observation_list() {
        let value = json!([
            {"time_tag": "2025-08-06T21:00:00", "kp_index": 2},
            {"time_tag": "2025-08-07T00:00:00", "kp_index": 4},
        ]);
        assert_eq!(kp_from_feed(&value), Some(4.0));
    }

    #[test]
    fn test_kp_unrecognized_shape() {
        assert_eq!(kp_from_feed(&json!({"kp": 4})), None);
    }

    #[test]
    fn test_storm_threshold_classification() {
        let quiet = SpaceWeather { kp_index: 3.0, storm: 3.0 >= KP_STORM_THRESHOLD };
        let storm = SpaceWeather { kp_index: 6.3, storm: 6.3 >= KP_STORM_THRESHOLD };
        assert!(!quiet.storm);
        assert!(storm.storm);
    }
}
