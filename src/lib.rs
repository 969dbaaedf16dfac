//! Personalized multi-stop itinerary planner.
//!
//! Scores nearby points of interest against a traveler's tag preferences,
//! orders them greedily by preference and proximity, and reports per-leg and
//! total travel metrics. Distances come from an OSRM routing service when one
//! is configured, with a haversine estimate as the always-available fallback.

pub mod models;
pub mod profile;
pub mod error;
pub mod config;
pub mod traits;
pub mod haversine;
pub mod osrm;
pub mod fallback;
pub mod scorer;
pub mod optimizer;
pub mod assembler;
pub mod planner;
pub mod memory;

pub use error::{DistanceError, PlanError};
pub use models::{Coordinate, ItineraryResult, ItineraryStop, LocationCandidate, PlanRequest, TagRef, TravelMode};
pub use planner::ItineraryPlanner;
pub use profile::PreferenceProfile;
