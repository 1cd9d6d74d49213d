mod config;
mod rules;

pub use config::MatchingConfig;

use crate::workflows::admissions::domain::ChildProfile;
use crate::workflows::catalog::{SchoolCatalog, SchoolRecord};
use serde::{Deserialize, Serialize};

/// Stateless engine that applies the rubric configuration to a profile.
/// Repeated calls with identical inputs produce identical matches.
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Score one school against the profile.
    pub fn score(&self, profile: &ChildProfile, school: &SchoolRecord) -> SchoolMatch {
        let (factors, total) = rules::score_school(profile, school, &self.config);
        let score = total.clamp(0, 100) as u8;

        SchoolMatch {
            school_id: school.id.clone(),
            score,
            chance: self.bucket_for(score),
            factors,
        }
    }

    /// Score every catalog school, ranked by descending score. The sort is
    /// stable, so equal scores keep catalog publication order.
    pub fn match_all(&self, profile: &ChildProfile, catalog: &SchoolCatalog) -> Vec<SchoolMatch> {
        let mut matches: Vec<SchoolMatch> = catalog
            .schools()
            .iter()
            .map(|school| self.score(profile, school))
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }

    fn bucket_for(&self, score: u8) -> ChanceBucket {
        let score = score as i16;
        if score >= self.config.high_chance_threshold {
            ChanceBucket::High
        } else if score >= self.config.medium_chance_threshold {
            ChanceBucket::Medium
        } else {
            ChanceBucket::Low
        }
    }
}

/// Scored dimensions permitted in the explanation trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDimension {
    Age,
    Board,
    Distance,
    Fees,
    Academics,
    Competition,
    Rating,
}

impl MatchDimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Board => "Board",
            Self::Distance => "Distance",
            Self::Fees => "Fees",
            Self::Academics => "Academics",
            Self::Competition => "Competition",
            Self::Rating => "Rating",
        }
    }
}

/// Tri-state reading of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorVerdict {
    Positive,
    Neutral,
    Negative,
}

impl FactorVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Discrete contribution to a match, allowing transparent explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFactor {
    pub dimension: MatchDimension,
    pub verdict: FactorVerdict,
    pub detail: String,
}

/// Coarse admit-likelihood label derived purely from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceBucket {
    High,
    Medium,
    Low,
}

impl ChanceBucket {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Match output for one (profile, school) pairing. Recomputed fresh on every
/// request; the factor list keeps rubric order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolMatch {
    pub school_id: String,
    pub score: u8,
    pub chance: ChanceBucket,
    pub factors: Vec<MatchFactor>,
}
