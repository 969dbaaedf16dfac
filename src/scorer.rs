//! Score candidate locations against a traveler's preference profile.
//!
//! A candidate's score blends two signals on a 0-100 scale:
//!
//! - **tag score**: mean positive affinity of the traveler for the candidate's
//!   tags, doubled and capped at 100;
//! - **rating score**: the aggregate rating mapped from `0..=5` to `0..=100`.
//!
//! Travelers with a thin profile lean on ratings, travelers with a rich
//! profile lean on their tags. A candidate with neither signal for a thin
//! profile gets a neutral score so it is not starved out entirely.

use rayon::prelude::*;

use crate::models::{LocationCandidate, round1};
use crate::profile::PreferenceProfile;

pub const LIMITED_PROFILE_THRESHOLD: usize = 3;
pub const TAG_SCORE_MULTIPLIER: f64 = 2.0;
pub const PRIMARY_SIGNAL_WEIGHT: f64 = 0.7;
pub const SECONDARY_SIGNAL_WEIGHT: f64 = 0.3;
pub const NEUTRAL_SCORE: f64 = 50.0;

const MAX_SCORE: f64 = 100.0;
const MAX_RATING: f64 = 5.0;

/// Tunable constants for [`PreferenceScorer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    /// Profiles with fewer nonzero tags than this count as limited.
    pub limited_profile_threshold: usize,
    pub tag_score_multiplier: f64,
    /// Weight of the dominant signal (tags for rich profiles, rating for limited ones).
    pub primary_weight: f64,
    pub secondary_weight: f64,
    pub neutral_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            limited_profile_threshold: LIMITED_PROFILE_THRESHOLD,
            tag_score_multiplier: TAG_SCORE_MULTIPLIER,
            primary_weight: PRIMARY_SIGNAL_WEIGHT,
            secondary_weight: SECONDARY_SIGNAL_WEIGHT,
            neutral_score: NEUTRAL_SCORE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferenceScorer {
    weights: ScoringWeights,
}

impl PreferenceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Whether `profile` counts as limited. Compute once per request.
    pub fn is_limited(&self, profile: &PreferenceProfile) -> bool {
        profile.has_limited_profile(self.weights.limited_profile_threshold)
    }

    /// Mean positive affinity over the candidate's tags, scaled and capped.
    pub fn tag_score(&self, candidate: &LocationCandidate, profile: &PreferenceProfile) -> f64 {
        let (sum, matches) = candidate
            .tags
            .iter()
            .filter_map(|tag| profile.affinity_for(tag.id))
            .filter(|affinity| *affinity > 0)
            .fold((0i64, 0u32), |(sum, count), affinity| {
                (sum.saturating_add(affinity), count + 1)
            });

        if matches == 0 {
            return 0.0;
        }

        let mean = sum as f64 / f64::from(matches);
        (mean * self.weights.tag_score_multiplier).min(MAX_SCORE)
    }

    pub fn rating_score(&self, candidate: &LocationCandidate) -> f64 {
        candidate
            .aggregate_rating
            .filter(|rating| rating.is_finite())
            .map(|rating| (rating.clamp(0.0, MAX_RATING) / MAX_RATING) * MAX_SCORE)
            .unwrap_or(0.0)
    }

    /// Score `candidate` in `0.0..=100.0`, rounded to one decimal.
    pub fn score(
        &self,
        candidate: &LocationCandidate,
        profile: &PreferenceProfile,
        has_limited_profile: bool,
    ) -> f64 {
        let tag_score = self.tag_score(candidate, profile);
        let rating_score = self.rating_score(candidate);
        let has_reviews = candidate.review_count.is_some_and(|count| count > 0);
        let w = &self.weights;

        let blended = match (has_limited_profile, has_reviews, tag_score > 0.0) {
            (true, true, _) => rating_score * w.primary_weight + tag_score * w.secondary_weight,
            (true, false, true) => tag_score,
            (true, false, false) => w.neutral_score,
            (false, _, true) => tag_score * w.primary_weight + rating_score * w.secondary_weight,
            (false, _, false) => rating_score,
        };

        round1(blended.clamp(0.0, MAX_SCORE))
    }

    /// Assign `preference_score` on every candidate.
    ///
    /// Candidates are independent, so scoring runs in parallel.
    pub fn score_all(&self, candidates: &mut [LocationCandidate], profile: &PreferenceProfile) {
        let limited = self.is_limited(profile);
        candidates.par_iter_mut().for_each(|candidate| {
            candidate.preference_score = self.score(candidate, profile, limited);
        });
        tracing::debug!(
            candidates = candidates.len(),
            limited_profile = limited,
            "scored candidates"
        );
    }

    /// Display names of the candidate's tags the traveler has a positive affinity for.
    pub fn matching_tag_names(
        candidate: &LocationCandidate,
        profile: &PreferenceProfile,
    ) -> Vec<String> {
        candidate
            .tags
            .iter()
            .filter(|tag| profile.affinity_for(tag.id).is_some_and(|a| a > 0))
            .map(|tag| tag.display_name.clone())
            .collect()
    }
}
