//! Real Las Vegas points of interest for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API. Tags and ratings
//! are made up but stable, so scoring expectations do not drift.

use itinerary_planner::{Coordinate, LocationCandidate, PreferenceProfile, TagRef};

pub const CASINO: u64 = 1;
pub const STEAKHOUSE: u64 = 2;
pub const PIZZA: u64 = 3;
pub const ASIAN: u64 = 4;
pub const BUFFET: u64 = 5;
pub const DESSERT: u64 = 6;
pub const MEXICAN: u64 = 7;

pub fn tag_name(id: u64) -> &'static str {
    match id {
        CASINO => "Casino",
        STEAKHOUSE => "Steakhouse",
        PIZZA => "Pizza",
        ASIAN => "Asian",
        BUFFET => "Buffet",
        DESSERT => "Dessert",
        MEXICAN => "Mexican",
        _ => "Other",
    }
}

/// A named point of interest with tags and an optional rating.
#[derive(Debug, Clone)]
pub struct Poi {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub tags: &'static [u64],
    pub rating: Option<f64>,
    pub reviews: u32,
}

impl Poi {
    pub const fn new(
        name: &'static str,
        lat: f64,
        lng: f64,
        tags: &'static [u64],
        rating: Option<f64>,
        reviews: u32,
    ) -> Self {
        Self {
            name,
            lat,
            lng,
            tags,
            rating,
            reviews,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn to_candidate(&self, id: impl Into<String>) -> LocationCandidate {
        let mut candidate = LocationCandidate::new(id, self.name, self.coordinate());
        candidate.description = format!("{} on the Las Vegas Strip", self.name);
        candidate.address = "Las Vegas Blvd S, Las Vegas, NV".to_string();
        candidate.image_urls = vec![format!(
            "https://images.example.com/{}.jpg",
            self.name.to_lowercase().replace(' ', "-")
        )];
        candidate.tags = self
            .tags
            .iter()
            .map(|id| TagRef::new(*id, tag_name(*id)))
            .collect();
        candidate.aggregate_rating = self.rating;
        candidate.review_count = Some(self.reviews).filter(|r| *r > 0);
        candidate
    }
}

// ============================================================================
// Start / End Points
// ============================================================================

pub const BELLAGIO: Coordinate = Coordinate::new(36.1126, -115.1767);
pub const WYNN: Coordinate = Coordinate::new(36.1263781, -115.1658180);
pub const MGM_GRAND: Coordinate = Coordinate::new(36.1023654, -115.1688720);

// ============================================================================
// Strip Points of Interest
// ============================================================================

pub const STRIP_POIS: &[Poi] = &[
    Poi::new("Caesars Palace", 36.1162, -115.1745, &[CASINO], Some(4.6), 5120),
    Poi::new("Gordon Ramsay Steak", 36.1127744, -115.1712029, &[STEAKHOUSE], Some(4.5), 2210),
    Poi::new("Bacchanal Buffet", 36.1159581, -115.1762929, &[BUFFET], Some(4.3), 8800),
    Poi::new("Beijing Noodle No. 9", 36.1158277, -115.1758038, &[ASIAN], Some(4.1), 640),
    Poi::new("Payard Patisserie", 36.1166582, -115.1759111, &[DESSERT], Some(4.4), 310),
    Poi::new("Grimaldi's Pizzeria", 36.1248850, -115.1683540, &[PIZZA], Some(4.0), 980),
    Poi::new("Delmonico Steakhouse", 36.1231561, -115.1686955, &[STEAKHOUSE], Some(4.7), 1760),
    Poi::new("Le Macaron", 36.1217180, -115.1689230, &[DESSERT], None, 0),
    Poi::new("Otto Pizzeria", 36.1231219, -115.1684514, &[PIZZA], Some(3.9), 420),
    Poi::new("Mr Chow", 36.1161158, -115.1761223, &[ASIAN], Some(4.2), 530),
    Poi::new("Hard Rock Cafe", 36.1041592, -115.1722166, &[STEAKHOUSE, PIZZA], Some(3.8), 2900),
    Poi::new("Best Friend", 36.1049396, -115.1739173, &[ASIAN], Some(4.5), 1200),
    Poi::new("Strip Steak", 36.0908722, -115.1776176, &[STEAKHOUSE], Some(4.6), 870),
    Poi::new("Diablo's Cantina", 36.0955372, -115.1751818, &[MEXICAN], Some(3.6), 450),
    Poi::new("Encore at Wynn", 36.1289345, -115.1653620, &[CASINO], Some(4.8), 3400),
];

// ============================================================================
// Outlying Points of Interest (well beyond a Strip-sized search radius)
// ============================================================================

pub const HENDERSON_POIS: &[Poi] = &[
    Poi::new("I Love Sushi Henderson", 35.9916660, -115.1028343, &[ASIAN], Some(4.4), 300),
    Poi::new("Islander's Grill", 36.0335058, -114.9856162, &[STEAKHOUSE], Some(4.0), 120),
    Poi::new("Green Valley Ranch Area", 36.0308, -115.0825, &[CASINO], Some(4.3), 2100),
];

/// Strip candidates with ids `strip-0`, `strip-1`, ...
pub fn strip_candidates() -> Vec<LocationCandidate> {
    STRIP_POIS
        .iter()
        .enumerate()
        .map(|(i, poi)| poi.to_candidate(format!("strip-{}", i)))
        .collect()
}

/// Every fixture candidate, Strip first.
pub fn all_candidates() -> Vec<LocationCandidate> {
    let mut all = strip_candidates();
    all.extend(
        HENDERSON_POIS
            .iter()
            .enumerate()
            .map(|(i, poi)| poi.to_candidate(format!("henderson-{}", i))),
    );
    all
}

/// A traveler who likes steak, pizza and dessert.
pub fn foodie_profile() -> PreferenceProfile {
    PreferenceProfile::new()
        .with_tag(STEAKHOUSE, 40)
        .with_tag(PIZZA, 25)
        .with_tag(DESSERT, 30)
        .with_tag(CASINO, 0)
}

/// A traveler with a single signal.
pub fn newcomer_profile() -> PreferenceProfile {
    PreferenceProfile::new().with_tag(ASIAN, 15)
}
