//! In-memory collaborators.
//!
//! Useful for embedding the planner next to a preloaded dataset and for tests.

use std::collections::HashMap;

use crate::error::PortError;
use crate::haversine::haversine_km;
use crate::models::{Coordinate, LocationCandidate};
use crate::profile::PreferenceProfile;
use crate::traits::{CandidateSource, PreferenceStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    profiles: HashMap<String, PreferenceProfile>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, traveler_id: impl Into<String>, profile: PreferenceProfile) -> Self {
        self.profiles.insert(traveler_id.into(), profile);
        self
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn preference_profile(&self, traveler_id: &str) -> Result<Option<PreferenceProfile>, PortError> {
        Ok(self.profiles.get(traveler_id).cloned())
    }
}

/// Candidates filtered by great-circle distance from the search center.
///
/// Results keep insertion order, which is also the tie-break order downstream.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCandidateSource {
    candidates: Vec<LocationCandidate>,
}

impl InMemoryCandidateSource {
    pub fn new(candidates: Vec<LocationCandidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn find_candidates_near(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<LocationCandidate>, PortError> {
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| haversine_km(center, candidate.coordinate) <= radius_km)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup() {
        let store = InMemoryPreferenceStore::new()
            .with_profile("alice", PreferenceProfile::new().with_tag(1, 5));
        let found = store.preference_profile("alice").expect("in-memory store never fails");
        assert_eq!(found.and_then(|p| p.affinity_for(1)), Some(5));
        assert!(store.preference_profile("bob").expect("in-memory store never fails").is_none());
    }

    #[test]
    fn test_radius_filter_keeps_order() {
        let source = InMemoryCandidateSource::new(vec![
            LocationCandidate::new("b", "B", Coordinate::new(0.0, 0.02)),
            LocationCandidate::new("far", "Far", Coordinate::new(0.0, 1.0)),
            LocationCandidate::new("a", "A", Coordinate::new(0.0, 0.01)),
        ]);
        let found = source
            .find_candidates_near(Coordinate::new(0.0, 0.0), 5.0)
            .expect("in-memory source never fails");
        let ids = found.iter().map(|c| c.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
