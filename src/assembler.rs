//! Turn an ordered list of stops into an itinerary with per-leg and summary metrics.

use crate::fallback::RequestDistances;
use crate::models::{
    Coordinate, ItineraryResult, ItineraryStop, LocationCandidate, TravelEstimate, round1, round2,
};
use crate::profile::PreferenceProfile;
use crate::scorer::PreferenceScorer;

/// Weight of total distance in the optimization score.
pub const DISTANCE_SCORE_FACTOR: f64 = 10.0;

pub struct ItineraryAssembler<'d, 'a> {
    distances: &'d RequestDistances<'a>,
    profile: &'d PreferenceProfile,
}

impl<'d, 'a> ItineraryAssembler<'d, 'a> {
    pub fn new(distances: &'d RequestDistances<'a>, profile: &'d PreferenceProfile) -> Self {
        Self { distances, profile }
    }

    /// Build the itinerary for `stops`, travelled in the given order from `start`.
    ///
    /// When `end` is given, the leg from the last stop to it counts toward the
    /// totals but is not listed as a stop.
    pub fn assemble(
        &self,
        start: Coordinate,
        stops: &[LocationCandidate],
        end: Option<Coordinate>,
    ) -> ItineraryResult {
        let mut waypoints = Vec::with_capacity(stops.len() + 2);
        waypoints.push(start);
        waypoints.extend(stops.iter().map(|stop| stop.coordinate));
        if let Some(end) = end.filter(|_| !stops.is_empty()) {
            waypoints.push(end);
        }

        // One batch for every leg, including the closing leg to `end`.
        let legs = self.distances.legs(&waypoints);

        let itinerary_stops = stops
            .iter()
            .zip(legs.iter().chain(std::iter::repeat(&TravelEstimate::ZERO)))
            .enumerate()
            .map(|(index, (stop, leg))| self.to_stop(stop, leg, index + 1))
            .collect::<Vec<_>>();

        let total_distance_km: f64 = legs.iter().map(|leg| leg.distance_km).sum();
        let total_travel_time_minutes = legs
            .iter()
            .fold(0u32, |total, leg| total.saturating_add(leg.travel_time_minutes));

        let scores = stops.iter().map(|stop| stop.preference_score).collect::<Vec<_>>();
        let average = mean(&scores);
        let variance = population_variance(&scores);

        let total_distance_km = round2(total_distance_km);
        ItineraryResult {
            stops: itinerary_stops,
            total_distance_km,
            total_travel_time_minutes,
            average_preference_score: round1(average),
            optimization_score: round1(total_distance_km * DISTANCE_SCORE_FACTOR + variance),
            used_exact_distances: self.distances.is_exact(),
        }
    }

    fn to_stop(&self, stop: &LocationCandidate, leg: &TravelEstimate, order: usize) -> ItineraryStop {
        ItineraryStop {
            location_id: stop.id.clone(),
            name: stop.name.clone(),
            description: stop.description.clone(),
            address: stop.address.clone(),
            coordinate: stop.coordinate,
            primary_image_url: stop.primary_image_url().map(str::to_string),
            preference_score: round1(stop.preference_score),
            distance_from_previous_km: round2(leg.distance_km),
            travel_time_from_previous_minutes: leg.travel_time_minutes,
            order,
            matching_tag_names: PreferenceScorer::matching_tag_names(stop, self.profile),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance over the whole population (divides by `n`, not `n - 1`).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DistanceError;
    use crate::haversine::HaversineEstimator;
    use crate::models::{TagRef, TravelMode};
    use crate::traits::DistanceProvider;

    fn stop(id: &str, lng: f64, score: f64) -> LocationCandidate {
        let mut candidate = LocationCandidate::new(id, id, Coordinate::new(0.0, lng));
        candidate.preference_score = score;
        candidate
    }

    #[test]
    fn test_population_variance() {
        assert_eq!(population_variance(&[]), 0.0);
        assert_eq!(population_variance(&[42.0]), 0.0);
        assert_eq!(population_variance(&[40.0, 60.0]), 100.0);
    }

    #[test]
    fn test_empty_itinerary() {
        let distances = RequestDistances::estimated(HaversineEstimator::default());
        let profile = PreferenceProfile::new();
        let result = ItineraryAssembler::new(&distances, &profile).assemble(
            Coordinate::new(0.0, 0.0),
            &[],
            Some(Coordinate::new(0.0, 1.0)),
        );
        assert!(result.stops.is_empty());
        assert_eq!(result.total_distance_km, 0.0);
        assert_eq!(result.total_travel_time_minutes, 0);
        assert_eq!(result.average_preference_score, 0.0);
        assert_eq!(result.optimization_score, 0.0);
    }

    #[test]
    fn test_legs_orders_and_totals() {
        let distances = RequestDistances::estimated(HaversineEstimator::default());
        let profile = PreferenceProfile::new();
        let stops = vec![stop("a", 0.01, 40.0), stop("b", 0.03, 60.0)];
        let result =
            ItineraryAssembler::new(&distances, &profile).assemble(Coordinate::new(0.0, 0.0), &stops, None);

        assert_eq!(result.stops.len(), 2);
        assert_eq!(result.stops[0].order, 1);
        assert_eq!(result.stops[1].order, 2);
        // 0.01 and 0.02 degrees of longitude at the equator.
        assert!((result.stops[0].distance_from_previous_km - 1.11).abs() < 0.01);
        assert!((result.stops[1].distance_from_previous_km - 2.22).abs() < 0.01);
        assert_eq!(result.stops[0].travel_time_from_previous_minutes, 3);
        assert_eq!(result.stops[1].travel_time_from_previous_minutes, 5);
        assert_eq!(result.total_travel_time_minutes, 8);
        assert!((result.total_distance_km - 3.34).abs() < 0.01);
        assert_eq!(result.average_preference_score, 50.0);
        // 3.34 * 10 + 100
        assert!((result.optimization_score - 133.4).abs() < 0.11);
        assert!(!result.used_exact_distances);
    }

    /// Answers every lookup with the longest representable travel time.
    struct EndlessProvider;

    impl DistanceProvider for EndlessProvider {
        fn distances_from(
            &self,
            _origin: Coordinate,
            destinations: &[Coordinate],
            _mode: TravelMode,
        ) -> Result<Vec<TravelEstimate>, DistanceError> {
            Ok(vec![
                TravelEstimate {
                    distance_km: 1.0,
                    travel_time_minutes: u32::MAX,
                };
                destinations.len()
            ])
        }
    }

    #[test]
    fn test_travel_time_total_saturates() {
        let provider = EndlessProvider;
        let distances = RequestDistances::new(Some(&provider), HaversineEstimator::default(), TravelMode::Driving);
        let profile = PreferenceProfile::new();
        let stops = vec![stop("a", 0.01, 50.0), stop("b", 0.02, 50.0)];

        let result =
            ItineraryAssembler::new(&distances, &profile).assemble(Coordinate::new(0.0, 0.0), &stops, None);
        assert_eq!(result.total_travel_time_minutes, u32::MAX);
        assert_eq!(result.total_distance_km, 2.0);
        assert!(result.used_exact_distances);
    }

    #[test]
    fn test_end_leg_counts_toward_totals_only() {
        let distances = RequestDistances::estimated(HaversineEstimator::default());
        let profile = PreferenceProfile::new();
        let stops = vec![stop("a", 0.01, 50.0)];
        let assembler = ItineraryAssembler::new(&distances, &profile);

        let open = assembler.assemble(Coordinate::new(0.0, 0.0), &stops, None);
        let closed = assembler.assemble(
            Coordinate::new(0.0, 0.0),
            &stops,
            Some(Coordinate::new(0.0, 0.02)),
        );

        assert_eq!(closed.stops.len(), 1);
        assert_eq!(closed.stops[0], open.stops[0]);
        assert!(closed.total_distance_km > open.total_distance_km + 1.0);
        assert!(closed.total_travel_time_minutes > open.total_travel_time_minutes);
    }

    #[test]
    fn test_stop_fields_copied_from_candidate() {
        let distances = RequestDistances::estimated(HaversineEstimator::default());
        let profile = PreferenceProfile::new().with_tag(3, 8);
        let mut candidate = stop("museum", 0.01, 72.0);
        candidate.description = "Old town museum".to_string();
        candidate.address = "1 Main St".to_string();
        candidate.image_urls = vec!["https://img/1.jpg".to_string(), "https://img/2.jpg".to_string()];
        candidate.tags = vec![TagRef::new(3, "History"), TagRef::new(4, "Kids")];

        let result = ItineraryAssembler::new(&distances, &profile).assemble(
            Coordinate::new(0.0, 0.0),
            &[candidate],
            None,
        );
        let stop = &result.stops[0];
        assert_eq!(stop.location_id, "museum");
        assert_eq!(stop.description, "Old town museum");
        assert_eq!(stop.address, "1 Main St");
        assert_eq!(stop.primary_image_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(stop.matching_tag_names, vec!["History"]);
        assert_eq!(stop.preference_score, 72.0);
    }
}
