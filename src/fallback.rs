//! Per-request distance source with sticky fallback to the local estimate.
//!
//! The exact provider is chosen once when the request starts. The first time
//! it fails (error, timeout, malformed body) the request switches to the
//! haversine estimate and stays there; the exact provider is not retried.

use std::cell::Cell;

use crate::error::DistanceError;
use crate::haversine::HaversineEstimator;
use crate::models::{Coordinate, TravelEstimate, TravelMode};
use crate::traits::DistanceProvider;

/// Infallible distance lookups for the lifetime of one planning request.
pub struct RequestDistances<'a> {
    exact: Option<&'a dyn DistanceProvider>,
    estimator: HaversineEstimator,
    mode: TravelMode,
    degraded: Cell<bool>,
}

impl<'a> RequestDistances<'a> {
    /// `exact` is `None` when exact distances are disabled for this request.
    pub fn new(
        exact: Option<&'a dyn DistanceProvider>,
        estimator: HaversineEstimator,
        mode: TravelMode,
    ) -> Self {
        Self {
            exact,
            estimator,
            mode,
            degraded: Cell::new(false),
        }
    }

    /// Estimate-only source.
    pub fn estimated(estimator: HaversineEstimator) -> Self {
        Self::new(None, estimator, TravelMode::default())
    }

    /// True while every answer so far has come from the exact provider.
    pub fn is_exact(&self) -> bool {
        self.exact.is_some() && !self.degraded.get()
    }

    pub fn from_origin(&self, origin: Coordinate, destinations: &[Coordinate]) -> Vec<TravelEstimate> {
        self.with_fallback(
            "one-to-many",
            |exact| exact.distances_from(origin, destinations, self.mode),
            destinations.len(),
            || self.estimator.estimate_from(origin, destinations),
        )
    }

    /// Estimates for consecutive legs of `waypoints`.
    pub fn legs(&self, waypoints: &[Coordinate]) -> Vec<TravelEstimate> {
        let expected = waypoints.len().saturating_sub(1);
        self.with_fallback(
            "leg sequence",
            |exact| exact.leg_distances(waypoints, self.mode),
            expected,
            || {
                let pairs = waypoints
                    .windows(2)
                    .map(|leg| (leg[0], leg[1]))
                    .collect::<Vec<_>>();
                self.estimator.estimate_pairs(&pairs)
            },
        )
    }

    pub fn between(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        self.legs(&[from, to])
            .into_iter()
            .next()
            .unwrap_or_else(|| self.estimator.estimate(from, to))
    }

    fn with_fallback(
        &self,
        operation: &str,
        query: impl FnOnce(&dyn DistanceProvider) -> Result<Vec<TravelEstimate>, DistanceError>,
        expected: usize,
        estimate: impl FnOnce() -> Vec<TravelEstimate>,
    ) -> Vec<TravelEstimate> {
        if expected == 0 {
            return Vec::new();
        }

        let exact = match self.exact {
            Some(exact) if !self.degraded.get() => exact,
            _ => return estimate(),
        };

        let result = query(exact).and_then(|estimates| {
            if estimates.len() == expected {
                Ok(estimates)
            } else {
                Err(DistanceError::Malformed(format!(
                    "expected {} estimates, got {}",
                    expected,
                    estimates.len()
                )))
            }
        });

        match result {
            Ok(estimates) => estimates,
            Err(err) => {
                tracing::warn!(
                    operation,
                    error = %err,
                    "exact distance provider failed; using haversine estimates for the rest of this request"
                );
                self.degraded.set(true);
                estimate()
            }
        }
    }
}
