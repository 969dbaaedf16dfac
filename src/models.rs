//! Value types shared by the scoring, routing and assembly stages.

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self { latitude, longitude }
    }
}

/// A tag attached to a location, e.g. "museum" or "street food".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub id: u64,
    pub display_name: String,
}

impl TagRef {
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// A point of interest eligible for an itinerary.
///
/// Produced by a [`CandidateSource`](crate::traits::CandidateSource); the only
/// field this crate writes is `preference_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCandidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    /// Aggregate rating in `0.0..=5.0`.
    #[serde(default)]
    pub aggregate_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Derived score in `0.0..=100.0`, assigned by the scorer.
    #[serde(default)]
    pub preference_score: f64,
}

impl LocationCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            address: String::new(),
            coordinate,
            image_urls: Vec::new(),
            tags: Vec::new(),
            aggregate_rating: None,
            review_count: None,
            preference_score: 0.0,
        }
    }

    pub fn primary_image_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Either the traveler's own position or a selected stop.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub coordinate: Coordinate,
    /// Id of the selected candidate; `None` for the traveler's position.
    pub location_id: Option<String>,
}

impl RoutePoint {
    pub fn position(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            location_id: None,
        }
    }

    pub fn stop(candidate: &LocationCandidate) -> Self {
        Self {
            coordinate: candidate.coordinate,
            location_id: Some(candidate.id.clone()),
        }
    }
}

/// How the traveler moves between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    /// Routing profile name understood by OSRM.
    pub fn osrm_profile(&self) -> &'static str {
        match self {
            TravelMode::Driving => "car",
            TravelMode::Walking => "foot",
            TravelMode::Cycling => "bike",
        }
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" | "car" => Ok(TravelMode::Driving),
            "walking" | "foot" => Ok(TravelMode::Walking),
            "cycling" | "bike" => Ok(TravelMode::Cycling),
            _ => Err(format!(
                "Invalid travel mode: {}. Use 'driving', 'walking' or 'cycling'",
                s
            )),
        }
    }
}

/// Distance and travel time for one leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    pub distance_km: f64,
    pub travel_time_minutes: u32,
}

impl TravelEstimate {
    pub const ZERO: TravelEstimate = TravelEstimate {
        distance_km: 0.0,
        travel_time_minutes: 0,
    };
}

/// One stop of a planned itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryStop {
    pub location_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub primary_image_url: Option<String>,
    pub preference_score: f64,
    pub distance_from_previous_km: f64,
    pub travel_time_from_previous_minutes: u32,
    /// 1-based position in the itinerary.
    pub order: usize,
    pub matching_tag_names: Vec<String>,
}

/// A planned itinerary with its summary metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub stops: Vec<ItineraryStop>,
    pub total_distance_km: f64,
    pub total_travel_time_minutes: u32,
    pub average_preference_score: f64,
    /// `total_distance_km * 10 + variance(preference scores)`; lower is tighter.
    pub optimization_score: f64,
    /// False when any distance in this itinerary came from the local estimate.
    pub used_exact_distances: bool,
}

/// A request to plan an itinerary for one traveler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub traveler_id: String,
    pub current_latitude: f64,
    pub current_longitude: f64,
    pub number_of_locations: usize,
    #[serde(default)]
    pub max_radius_km: Option<f64>,
    #[serde(default)]
    pub preferred_area_latitude: Option<f64>,
    #[serde(default)]
    pub preferred_area_longitude: Option<f64>,
    #[serde(default)]
    pub preferred_area_radius_km: Option<f64>,
    #[serde(default)]
    pub end_latitude: Option<f64>,
    #[serde(default)]
    pub end_longitude: Option<f64>,
    #[serde(default)]
    pub travel_mode: Option<TravelMode>,
}

impl PlanRequest {
    pub fn new(
        traveler_id: impl Into<String>,
        current: Coordinate,
        number_of_locations: usize,
    ) -> Self {
        Self {
            traveler_id: traveler_id.into(),
            current_latitude: current.latitude,
            current_longitude: current.longitude,
            number_of_locations,
            max_radius_km: None,
            preferred_area_latitude: None,
            preferred_area_longitude: None,
            preferred_area_radius_km: None,
            end_latitude: None,
            end_longitude: None,
            travel_mode: None,
        }
    }

    pub fn with_max_radius(mut self, radius_km: f64) -> Self {
        self.max_radius_km = Some(radius_km);
        self
    }

    pub fn with_preferred_area(mut self, center: Coordinate, radius_km: Option<f64>) -> Self {
        self.preferred_area_latitude = Some(center.latitude);
        self.preferred_area_longitude = Some(center.longitude);
        self.preferred_area_radius_km = radius_km;
        self
    }

    pub fn with_end(mut self, end: Coordinate) -> Self {
        self.end_latitude = Some(end.latitude);
        self.end_longitude = Some(end.longitude);
        self
    }

    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = Some(mode);
        self
    }

    pub fn current(&self) -> Coordinate {
        Coordinate::new(self.current_latitude, self.current_longitude)
    }

    /// End point, only when both coordinates are present.
    pub fn end(&self) -> Option<Coordinate> {
        match (self.end_latitude, self.end_longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }

    /// Preferred search center, only when both coordinates are present.
    pub fn preferred_area(&self) -> Option<Coordinate> {
        match (self.preferred_area_latitude, self.preferred_area_longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round a score-derived value to one decimal place.
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Round a distance to two decimal places.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}
