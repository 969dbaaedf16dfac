//! Traveler preference profile.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const TAG_KEY_PREFIX: &str = "tag_";

/// Key under which the affinity for tag `id` is stored.
pub fn tag_key(id: u64) -> String {
    format!("{}{}", TAG_KEY_PREFIX, id)
}

/// Mapping from tag key (`tag_<id>`) to an affinity score.
///
/// Zero or absent entries carry no signal. Negative values are kept but never
/// count as a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceProfile {
    affinities: HashMap<String, i64>,
}

impl PreferenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag_id: u64, affinity: i64) -> Self {
        self.affinities.insert(tag_key(tag_id), affinity);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, affinity: i64) {
        self.affinities.insert(key.into(), affinity);
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.affinities.get(key).copied()
    }

    pub fn affinity_for(&self, tag_id: u64) -> Option<i64> {
        self.get(&tag_key(tag_id))
    }

    /// Number of tag entries with a nonzero affinity.
    pub fn signal_count(&self) -> usize {
        self.affinities
            .iter()
            .filter(|(key, value)| key.starts_with(TAG_KEY_PREFIX) && **value != 0)
            .count()
    }

    /// True when fewer than `threshold` tags carry any signal.
    pub fn has_limited_profile(&self, threshold: usize) -> bool {
        self.signal_count() < threshold
    }
}

impl FromIterator<(String, i64)> for PreferenceProfile {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            affinities: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, i64>> for PreferenceProfile {
    fn from(affinities: HashMap<String, i64>) -> Self {
        Self { affinities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_key_format() {
        assert_eq!(tag_key(42), "tag_42");
    }

    #[test]
    fn test_limited_profile_counts_nonzero_tags_only() {
        let mut profile = PreferenceProfile::new()
            .with_tag(1, 10)
            .with_tag(2, 0)
            .with_tag(3, -4);
        profile.insert("visits_total", 12);

        assert_eq!(profile.signal_count(), 2);
        assert!(profile.has_limited_profile(3));

        let profile = profile.with_tag(4, 1);
        assert!(!profile.has_limited_profile(3));
    }

    #[test]
    fn test_deserializes_from_plain_map() {
        let profile: PreferenceProfile =
            serde_json::from_str(r#"{"tag_1": 10, "tag_7": 3}"#).expect("valid profile json");
        assert_eq!(profile.affinity_for(1), Some(10));
        assert_eq!(profile.affinity_for(7), Some(3));
        assert_eq!(profile.affinity_for(8), None);
    }
}
