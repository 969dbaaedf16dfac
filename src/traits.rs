//! Ports between the planning core and the outside world.
//!
//! The core only depends on these narrow interfaces, so scoring and routing can
//! run against in-memory fixtures as easily as against a routing service and
//! a database.

use crate::error::{DistanceError, PortError};
use crate::models::{Coordinate, LocationCandidate, TravelEstimate, TravelMode};
use crate::profile::PreferenceProfile;

/// Distance and travel time between coordinates.
///
/// Implementations must return results in the same order as the input.
pub trait DistanceProvider {
    /// Travel estimates from `origin` to each of `destinations`.
    fn distances_from(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError>;

    /// Travel estimates for independent `(from, to)` pairs.
    fn pair_distances(
        &self,
        pairs: &[(Coordinate, Coordinate)],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        pairs
            .iter()
            .map(|(from, to)| self.distance(*from, *to, mode))
            .collect()
    }

    /// Travel estimates for each consecutive leg of `waypoints`.
    ///
    /// Returns `waypoints.len() - 1` estimates (none for fewer than two points).
    fn leg_distances(
        &self,
        waypoints: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        let pairs = waypoints
            .windows(2)
            .map(|leg| (leg[0], leg[1]))
            .collect::<Vec<_>>();
        self.pair_distances(&pairs, mode)
    }

    /// Travel estimate for a single pair.
    fn distance(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, DistanceError> {
        self.distances_from(from, &[to], mode)?
            .into_iter()
            .next()
            .ok_or_else(|| DistanceError::Malformed("empty result for single pair".to_string()))
    }
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for &T {
    fn distances_from(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        (**self).distances_from(origin, destinations, mode)
    }

    fn pair_distances(
        &self,
        pairs: &[(Coordinate, Coordinate)],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        (**self).pair_distances(pairs, mode)
    }

    fn leg_distances(
        &self,
        waypoints: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        (**self).leg_distances(waypoints, mode)
    }

    fn distance(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, DistanceError> {
        (**self).distance(from, to, mode)
    }
}

/// Source of traveler preference profiles.
pub trait PreferenceStore {
    /// `Ok(None)` when the traveler has never onboarded.
    fn preference_profile(&self, traveler_id: &str) -> Result<Option<PreferenceProfile>, PortError>;
}

/// Spatial query for candidate locations.
///
/// Returned candidates must carry their tags, aggregate rating and review count.
pub trait CandidateSource {
    fn find_candidates_near(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<LocationCandidate>, PortError>;
}
