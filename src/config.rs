//! Planner and routing-service configuration.

use std::env;
use std::str::FromStr;

use crate::haversine::DEFAULT_SPEED_KMH;
use crate::models::TravelMode;
use crate::optimizer::RouteWeights;
use crate::scorer::ScoringWeights;

/// Search radius used when the request does not name one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Largest destination set sent in a single `table` request.
    pub max_table_destinations: usize,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            max_table_destinations: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Use the routing service for distances. Evaluated once per request.
    pub exact_distances_enabled: bool,
    pub travel_mode: TravelMode,
    pub default_radius_km: f64,
    /// Average speed assumed by the haversine estimate.
    pub estimate_speed_kmh: f64,
    pub scoring: ScoringWeights,
    pub routing: RouteWeights,
    pub osrm: OsrmConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            exact_distances_enabled: false,
            travel_mode: TravelMode::default(),
            default_radius_km: DEFAULT_RADIUS_KM,
            estimate_speed_kmh: DEFAULT_SPEED_KMH,
            scoring: ScoringWeights::default(),
            routing: RouteWeights::default(),
            osrm: OsrmConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Build a config from `ITINERARY_*` and `OSRM_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparseable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source, using the same keys as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            exact_distances_enabled: value_or(&lookup, "ITINERARY_EXACT_DISTANCES", defaults.exact_distances_enabled),
            travel_mode: value_or(&lookup, "ITINERARY_TRAVEL_MODE", defaults.travel_mode),
            default_radius_km: positive_or(&lookup, "ITINERARY_DEFAULT_RADIUS_KM", defaults.default_radius_km),
            estimate_speed_kmh: positive_or(
                &lookup,
                "ITINERARY_ESTIMATE_SPEED_KMH",
                defaults.estimate_speed_kmh,
            ),
            scoring: defaults.scoring,
            routing: defaults.routing,
            osrm: OsrmConfig {
                base_url: lookup("OSRM_BASE_URL").unwrap_or(defaults.osrm.base_url),
                timeout_secs: value_or(&lookup, "OSRM_TIMEOUT_SECS", defaults.osrm.timeout_secs),
                max_table_destinations: value_or(
                    &lookup,
                    "OSRM_MAX_TABLE_DESTINATIONS",
                    defaults.osrm.max_table_destinations,
                ),
            },
        }
    }
}

fn value_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment variable");
            default
        }),
        None => default,
    }
}

/// Like [`value_or`], but also rejects zero, negative and non-finite numbers.
fn positive_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    let value = value_or(lookup, key, default);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!(key, value, "ignoring non-positive environment variable");
        default
    }
}
