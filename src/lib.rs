//! Binnect Search - Partner search service for the Binnect business directory
//!
//! This library provides the matching and ranking engine used by the Binnect
//! business directory. Candidate profiles are filtered against the caller's
//! search terms, scored for relevance, and returned in descending score order.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_filter, matches_filter, recommendation_score, Matcher, SearchResult};
pub use crate::models::{
    BusinessProfile, Location, ProfileFilter, ScoreWeights, ScoredBusiness, SearchQuery,
    SearchResponse,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let weights = ScoreWeights::default();
        assert_eq!(weights.service, 5.0);
        assert_eq!(weights.industry, 3.0);
        assert_eq!(weights.city, 2.0);
    }
}
