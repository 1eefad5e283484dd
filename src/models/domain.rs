use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Business profile as published in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    #[serde(rename = "businessName")]
    pub business_name: String,
    pub industry: String,
    pub location: Location,
    #[serde(rename = "servicesOffered", default)]
    pub services_offered: Vec<String>,
    #[serde(rename = "servicesRequired", default)]
    pub services_required: Vec<String>,
    #[serde(rename = "pricingRange", default)]
    pub pricing_range: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Business location; only the city takes part in matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Error returned when a search request cannot be accepted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("at least one search term (service or city) is required")]
    MissingTerms,
}

/// Validated search terms plus the requesting owner to exclude from results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub service: Option<String>,
    pub city: Option<String>,
    pub requester: Uuid,
}

impl SearchQuery {
    /// Normalize raw query parameters and enforce the at-least-one-term rule.
    ///
    /// Terms are trimmed; a term that is empty after trimming counts as
    /// absent. Accepted terms are kept as-is, matching is case-insensitive
    /// downstream.
    pub fn new(
        service: Option<String>,
        city: Option<String>,
        requester: Uuid,
    ) -> Result<Self, QueryError> {
        let service = normalize_term(service);
        let city = normalize_term(city);

        if service.is_none() && city.is_none() {
            return Err(QueryError::MissingTerms);
        }

        Ok(Self {
            service,
            city,
            requester,
        })
    }
}

fn normalize_term(term: Option<String>) -> Option<String> {
    let term = term?;
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Immutable candidate constraints derived from a query
///
/// Built once per search and handed both to the directory store (SQL
/// pre-filter) and to the in-process predicate.
#[derive(Debug, Clone)]
pub struct ProfileFilter {
    pub exclude_owner: Uuid,
    pub service: Option<String>,
    pub city: Option<String>,
}

/// Search hit: the full profile plus its computed relevance score
///
/// The score is derived per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredBusiness {
    #[serde(flatten)]
    pub business: BusinessProfile,
    #[serde(rename = "recommendationScore")]
    pub recommendation_score: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub service: f64,
    pub industry: f64,
    pub city: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            service: 5.0,
            industry: 3.0,
            city: 2.0,
        }
    }
}
