//! Greedy stop ordering.
//!
//! Starting from the traveler's position, each step asks the distance source
//! for distances to every remaining candidate and takes the one with the best
//! blend of preference and proximity. Ties go to the candidate that came first
//! in the input. When an end point is given, the last few stops are reordered
//! so the route finishes near it.

use std::cmp::Ordering;

use crate::fallback::RequestDistances;
use crate::haversine::haversine_km;
use crate::models::{Coordinate, LocationCandidate, RoutePoint};

pub const PREFERENCE_WEIGHT: f64 = 0.7;
pub const PROXIMITY_WEIGHT: f64 = 0.3;
/// Distance beyond which proximity earns no credit.
pub const PROXIMITY_DECAY_KM: f64 = 10.0;
pub const MAX_TAIL_SIZE: usize = 3;

const MAX_PROXIMITY_SCORE: f64 = 100.0;

/// Tunable constants for [`RouteOptimizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteWeights {
    pub preference_weight: f64,
    pub proximity_weight: f64,
    pub proximity_decay_km: f64,
    /// Upper bound on how many final stops the end-point pass may reorder.
    pub max_tail_size: usize,
}

impl Default for RouteWeights {
    fn default() -> Self {
        Self {
            preference_weight: PREFERENCE_WEIGHT,
            proximity_weight: PROXIMITY_WEIGHT,
            proximity_decay_km: PROXIMITY_DECAY_KM,
            max_tail_size: MAX_TAIL_SIZE,
        }
    }
}

impl RouteWeights {
    /// Linear credit from 100 at the current position down to 0 at the decay distance.
    ///
    /// A non-positive or non-finite decay distance gives no proximity credit.
    pub fn proximity_score(&self, distance_km: f64) -> f64 {
        if !(self.proximity_decay_km.is_finite() && self.proximity_decay_km > 0.0) {
            return 0.0;
        }
        let per_km = MAX_PROXIMITY_SCORE / self.proximity_decay_km;
        (MAX_PROXIMITY_SCORE - distance_km * per_km).max(0.0)
    }

    pub fn composite_score(&self, preference_score: f64, distance_km: f64) -> f64 {
        preference_score * self.preference_weight
            + self.proximity_score(distance_km) * self.proximity_weight
    }
}

pub struct RouteOptimizer<'d, 'a> {
    distances: &'d RequestDistances<'a>,
    weights: RouteWeights,
}

impl<'d, 'a> RouteOptimizer<'d, 'a> {
    pub fn new(distances: &'d RequestDistances<'a>, weights: RouteWeights) -> Self {
        Self { distances, weights }
    }

    /// Order up to `requested` candidates into a route from `start`.
    ///
    /// Returns `min(requested, candidates.len())` stops; an empty input gives
    /// an empty route.
    pub fn optimize(
        &self,
        start: Coordinate,
        candidates: Vec<LocationCandidate>,
        requested: usize,
        end: Option<Coordinate>,
    ) -> Vec<LocationCandidate> {
        let target = requested.min(candidates.len());
        let mut remaining = candidates;
        let mut route: Vec<LocationCandidate> = Vec::with_capacity(target);
        let mut current = RoutePoint::position(start);

        while route.len() < target {
            let Some(index) = self.pick_next(current.coordinate, &remaining) else {
                break;
            };
            route.push(remaining.remove(index));
            if let Some(selected) = route.last() {
                tracing::debug!(
                    step = route.len(),
                    location_id = %selected.id,
                    preference_score = selected.preference_score,
                    "selected stop"
                );
                current = RoutePoint::stop(selected);
            }
        }

        match end {
            Some(end) if route.len() > 1 => self.finish_near(route, end),
            _ => route,
        }
    }

    /// Index in `remaining` of the best next stop from `position`.
    fn pick_next(&self, position: Coordinate, remaining: &[LocationCandidate]) -> Option<usize> {
        let destinations = remaining.iter().map(|c| c.coordinate).collect::<Vec<_>>();
        let estimates = self.distances.from_origin(position, &destinations);

        let mut best: Option<(usize, f64)> = None;
        for (index, (candidate, estimate)) in remaining.iter().zip(&estimates).enumerate() {
            let composite = self
                .weights
                .composite_score(candidate.preference_score, estimate.distance_km);
            // Strictly greater: the earliest candidate wins a tie.
            if best.is_none_or(|(_, best_score)| composite > best_score) {
                best = Some((index, composite));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Reorder the last few stops by descending straight-line distance to `end`.
    ///
    /// Membership and the prefix are untouched.
    fn finish_near(&self, mut route: Vec<LocationCandidate>, end: Coordinate) -> Vec<LocationCandidate> {
        let tail_size = self.weights.max_tail_size.min(route.len() / 2);
        if tail_size == 0 {
            return route;
        }

        let split = route.len() - tail_size;
        route[split..].sort_by(|a, b| {
            haversine_km(b.coordinate, end)
                .partial_cmp(&haversine_km(a.coordinate, end))
                .unwrap_or(Ordering::Equal)
        });
        route
    }
}
