//! Haversine distance provider (fallback when the routing service is unavailable).
//!
//! Uses great-circle distance to estimate travel time.
//! Less accurate than a road network (ignores roads) but always available.

use crate::error::DistanceError;
use crate::models::{Coordinate, TravelEstimate, TravelMode};
use crate::traits::DistanceProvider;

/// Average urban speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// True for speeds the estimate can divide by.
fn is_usable_speed(speed_kmh: f64) -> bool {
    speed_kmh.is_finite() && speed_kmh > 0.0
}

/// Haversine-based distance provider.
///
/// Estimates travel time using straight-line distance and an assumed speed.
/// Ignores the travel mode and never fails.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Assumed average speed in km/h. Always positive and finite.
    speed_kmh: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineEstimator {
    /// Estimator assuming `speed_kmh`; unusable speeds fall back to the default.
    pub fn new(speed_kmh: f64) -> Self {
        if !is_usable_speed(speed_kmh) {
            tracing::warn!(speed_kmh, "ignoring non-positive estimate speed");
            return Self::default();
        }
        Self { speed_kmh }
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Convert distance in km to whole travel minutes, rounded up.
    pub fn km_to_minutes(&self, km: f64) -> u32 {
        ((km / self.speed_kmh) * 60.0).ceil() as u32
    }

    pub fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        let distance_km = haversine_km(from, to);
        TravelEstimate {
            distance_km,
            travel_time_minutes: self.km_to_minutes(distance_km),
        }
    }

    pub fn estimate_from(&self, origin: Coordinate, destinations: &[Coordinate]) -> Vec<TravelEstimate> {
        destinations
            .iter()
            .map(|destination| self.estimate(origin, *destination))
            .collect()
    }

    pub fn estimate_pairs(&self, pairs: &[(Coordinate, Coordinate)]) -> Vec<TravelEstimate> {
        pairs.iter().map(|(from, to)| self.estimate(*from, *to)).collect()
    }
}

impl DistanceProvider for HaversineEstimator {
    fn distances_from(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        _mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        Ok(self.estimate_from(origin, destinations))
    }

    fn pair_distances(
        &self,
        pairs: &[(Coordinate, Coordinate)],
        _mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        Ok(self.estimate_pairs(pairs))
    }
}
