//! Error types surfaced by the planner and its distance providers.

use thiserror::Error;

/// Failure reported by an external collaborator (preference store, candidate source).
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced to the caller of [`crate::planner::ItineraryPlanner::plan`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// The traveler has never onboarded.
    #[error("preference profile not found for traveler {traveler_id}")]
    ProfileNotFound { traveler_id: String },

    /// The search area is empty; the caller should suggest a wider radius.
    #[error("no candidates found within {radius_km} km of ({latitude}, {longitude})")]
    NoCandidates {
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A preference store or candidate source failed outright.
    #[error("collaborator failure: {0}")]
    Collaborator(String),
}

impl PlanError {
    /// True for the "not found" family of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlanError::ProfileNotFound { .. } | PlanError::NoCandidates { .. }
        )
    }
}

/// Failures of the exact distance provider.
///
/// These never reach the planner's caller: the per-request distance source
/// logs them and switches to the local estimate.
#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("routing service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing service returned status {0}")]
    Status(u16),

    #[error("routing service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("malformed routing response: {0}")]
    Malformed(String),
}
