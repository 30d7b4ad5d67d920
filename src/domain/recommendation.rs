// Savings recommendation domain model
use crate::domain::consumption::Resource;
use serde::{Deserialize, Serialize};

/// Recommendations cover the three metered resources plus general advice
/// that is not tied to a single meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Electricity,
    Water,
    Gas,
    General,
}

impl RecommendationKind {
    pub fn resource(&self) -> Option<Resource> {
        match self {
            RecommendationKind::Electricity => Some(Resource::Electricity),
            RecommendationKind::Water => Some(Resource::Water),
            RecommendationKind::Gas => Some(Resource::Gas),
            RecommendationKind::General => None,
        }
    }
}

/// A catalog entry with an estimated yearly saving. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub potential_savings: f64,
}
