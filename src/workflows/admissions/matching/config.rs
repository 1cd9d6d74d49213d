use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rubric configuration for the matching engine: score thresholds plus the
/// class-to-expected-age table. Built explicitly and passed in so multiple
/// catalogs or locales can run side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub base_score: i16,
    pub class_age_expectations: BTreeMap<String, f32>,
    /// Expected age for class labels missing from the table.
    pub fallback_age: f32,
    /// Distances at or under this read as an easy commute.
    pub near_distance_km: f32,
    /// Ratings at or above this earn an informational spotlight factor.
    pub rating_spotlight: f32,
    pub high_chance_threshold: i16,
    pub medium_chance_threshold: i16,
}

impl MatchingConfig {
    /// The standard rubric. The age table spans the full Nursery-to-Class-10
    /// range; unmapped labels still fall back to `fallback_age`. Pre-primary
    /// entries sit on intake-window midpoints (admissions run 3-4, 4-5, 5-6).
    pub fn standard() -> Self {
        let mut class_age_expectations = BTreeMap::new();
        class_age_expectations.insert("Nursery".to_string(), 3.5);
        class_age_expectations.insert("LKG".to_string(), 4.5);
        class_age_expectations.insert("UKG".to_string(), 5.5);
        for (index, age) in (6..=15).enumerate() {
            class_age_expectations.insert(format!("Class {}", index + 1), age as f32);
        }

        Self {
            base_score: 50,
            class_age_expectations,
            fallback_age: 6.0,
            near_distance_km: 3.0,
            rating_spotlight: 4.5,
            high_chance_threshold: 70,
            medium_chance_threshold: 45,
        }
    }

    pub fn expected_age_for(&self, class_label: &str) -> f32 {
        self.class_age_expectations
            .get(class_label)
            .copied()
            .unwrap_or(self.fallback_age)
    }
}
