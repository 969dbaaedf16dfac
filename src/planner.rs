//! Itinerary planning service.
//!
//! Ties the pieces together for one request: load the traveler's profile,
//! fetch and score candidates in the search area, order them greedily and
//! assemble the final itinerary. Each call is independent; nothing is cached
//! between requests.

use std::collections::HashSet;

use crate::assembler::ItineraryAssembler;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::fallback::RequestDistances;
use crate::haversine::HaversineEstimator;
use crate::models::{Coordinate, ItineraryResult, LocationCandidate, PlanRequest};
use crate::optimizer::RouteOptimizer;
use crate::osrm::OsrmClient;
use crate::scorer::PreferenceScorer;
use crate::traits::{CandidateSource, DistanceProvider, PreferenceStore};

/// Where to look for candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub center: Coordinate,
    pub radius_km: f64,
}

pub struct ItineraryPlanner<P, C> {
    preferences: P,
    candidates: C,
    config: PlannerConfig,
    scorer: PreferenceScorer,
    exact: Option<Box<dyn DistanceProvider + Send + Sync>>,
}

impl<P, C> ItineraryPlanner<P, C>
where
    P: PreferenceStore,
    C: CandidateSource,
{
    /// Planner using only estimated distances until an exact provider is attached.
    pub fn new(preferences: P, candidates: C, config: PlannerConfig) -> Self {
        let scorer = PreferenceScorer::new(config.scoring.clone());
        Self {
            preferences,
            candidates,
            config,
            scorer,
            exact: None,
        }
    }

    /// Attach an OSRM client built from `config.osrm`.
    pub fn with_osrm(self) -> Result<Self, reqwest::Error> {
        let client = OsrmClient::new(self.config.osrm.clone())?;
        Ok(self.with_exact_provider(client))
    }

    pub fn with_exact_provider(mut self, provider: impl DistanceProvider + Send + Sync + 'static) -> Self {
        self.exact = Some(Box::new(provider));
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan an itinerary for `request`.
    ///
    /// Fails only when the request is invalid, the traveler has no profile,
    /// the search area is empty, or a collaborator errors. Routing-service
    /// trouble degrades to estimated distances instead.
    pub fn plan(&self, request: &PlanRequest) -> Result<ItineraryResult, PlanError> {
        validate(request)?;

        let profile = self
            .preferences
            .preference_profile(&request.traveler_id)
            .map_err(|err| PlanError::Collaborator(err.to_string()))?
            .ok_or_else(|| PlanError::ProfileNotFound {
                traveler_id: request.traveler_id.clone(),
            })?;

        let area = self.search_area(request);
        let mut candidates = self
            .candidates
            .find_candidates_near(area.center, area.radius_km)
            .map_err(|err| PlanError::Collaborator(err.to_string()))?;
        dedupe_by_id(&mut candidates);

        if candidates.is_empty() {
            return Err(PlanError::NoCandidates {
                latitude: area.center.latitude,
                longitude: area.center.longitude,
                radius_km: area.radius_km,
            });
        }

        self.scorer.score_all(&mut candidates, &profile);

        // Strategy is fixed here for the whole request.
        let exact = if self.config.exact_distances_enabled {
            self.exact.as_deref().map(|provider| provider as &dyn DistanceProvider)
        } else {
            None
        };
        let mode = request.travel_mode.unwrap_or(self.config.travel_mode);
        let distances = RequestDistances::new(
            exact,
            HaversineEstimator::new(self.config.estimate_speed_kmh),
            mode,
        );

        let start = request.current();
        let end = request.end();
        let available = candidates.len();

        let route = RouteOptimizer::new(&distances, self.config.routing.clone()).optimize(
            start,
            candidates,
            request.number_of_locations,
            end,
        );
        let itinerary = ItineraryAssembler::new(&distances, &profile).assemble(start, &route, end);

        if itinerary.stops.len() < request.number_of_locations {
            tracing::debug!(
                requested = request.number_of_locations,
                available,
                "fewer candidates than requested stops"
            );
        }
        tracing::info!(
            traveler_id = %request.traveler_id,
            stops = itinerary.stops.len(),
            total_distance_km = itinerary.total_distance_km,
            exact_distances = itinerary.used_exact_distances,
            "planned itinerary"
        );

        Ok(itinerary)
    }

    /// Resolve where to search for candidates.
    ///
    /// A preferred area wins over the current position; an explicit radius
    /// wins over the configured default.
    pub fn search_area(&self, request: &PlanRequest) -> SearchArea {
        match request.preferred_area() {
            Some(center) => SearchArea {
                center,
                radius_km: request
                    .preferred_area_radius_km
                    .or(request.max_radius_km)
                    .unwrap_or(self.config.default_radius_km),
            },
            None => SearchArea {
                center: request.current(),
                radius_km: request.max_radius_km.unwrap_or(self.config.default_radius_km),
            },
        }
    }
}

fn validate(request: &PlanRequest) -> Result<(), PlanError> {
    if request.number_of_locations == 0 {
        return Err(PlanError::InvalidRequest(
            "numberOfLocations must be at least 1".to_string(),
        ));
    }
    if !request.current().is_valid() {
        return Err(PlanError::InvalidRequest("current position is not a valid coordinate".to_string()));
    }
    if request.end().is_some_and(|end| !end.is_valid()) {
        return Err(PlanError::InvalidRequest("end position is not a valid coordinate".to_string()));
    }
    if request.preferred_area().is_some_and(|area| !area.is_valid()) {
        return Err(PlanError::InvalidRequest("preferred area is not a valid coordinate".to_string()));
    }

    let radii = [request.max_radius_km, request.preferred_area_radius_km];
    if radii.into_iter().flatten().any(|r| !r.is_finite() || r <= 0.0) {
        return Err(PlanError::InvalidRequest("search radius must be a positive number".to_string()));
    }

    Ok(())
}

/// Drop repeated ids, keeping the first occurrence.
fn dedupe_by_id(candidates: &mut Vec<LocationCandidate>) {
    let mut seen = HashSet::new();
    candidates.retain(|candidate| seen.insert(candidate.id.clone()));
}
