use crate::core::{
    filters::{build_filter, matches_filter},
    scoring::recommendation_score,
};
use crate::models::{BusinessProfile, ScoreWeights, ScoredBusiness, SearchQuery};

/// Result of the matching process
#[derive(Debug)]
pub struct SearchResult {
    pub businesses: Vec<ScoredBusiness>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline stages
/// 1. Candidate filter (self-exclusion + substring terms)
/// 2. Relevance scoring
/// 3. Deterministic descending sort
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoreWeights,
}

impl Matcher {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoreWeights::default(),
        }
    }

    /// Rank the candidates that qualify for a search query
    ///
    /// Every candidate passing the filter is scored and returned; ranking
    /// never drops or adds entries, so an empty result simply means nothing
    /// qualified.
    ///
    /// # Arguments
    /// * `query` - The validated search terms and requester identity
    /// * `candidates` - Profiles retrieved from the directory store
    ///
    /// # Returns
    /// SearchResult with scored profiles in descending score order and the
    /// size of the retrieved candidate set
    pub fn rank(&self, query: &SearchQuery, candidates: Vec<BusinessProfile>) -> SearchResult {
        let total_candidates = candidates.len();
        let filter = build_filter(query);

        let mut businesses: Vec<ScoredBusiness> = candidates
            .into_iter()
            .filter(|profile| matches_filter(profile, &filter))
            .map(|profile| {
                let score = recommendation_score(&profile, query, &self.weights);
                ScoredBusiness {
                    business: profile,
                    recommendation_score: score,
                }
            })
            .collect();

        // Descending by score; newest-first creation time, then id, keep the
        // order total so equal scores rank deterministically
        businesses.sort_by(|a, b| {
            b.recommendation_score
                .partial_cmp(&a.recommendation_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.business.created_at.cmp(&a.business.created_at))
                .then_with(|| a.business.id.cmp(&b.business.id))
        });

        SearchResult {
            businesses,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_candidate(
        owner: Uuid,
        services: &[&str],
        industry: &str,
        city: &str,
        rating: f64,
    ) -> BusinessProfile {
        BusinessProfile {
            id: Uuid::new_v4(),
            owner_id: owner,
            business_name: format!("{} Co", industry),
            industry: industry.to_string(),
            location: Location {
                city: city.to_string(),
                state: None,
            },
            services_offered: services.iter().map(|s| s.to_string()).collect(),
            services_required: vec![],
            pricing_range: None,
            verified: false,
            rating,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_filters_and_scores() {
        let matcher = Matcher::with_default_weights();
        let requester = Uuid::new_v4();
        let query = SearchQuery::new(
            Some("Plumbing".to_string()),
            Some("Pune".to_string()),
            requester,
        )
        .unwrap();

        let candidates = vec![
            create_candidate(
                Uuid::new_v4(),
                &["Plumbing", "Electrical"],
                "Home Services",
                "Pune",
                4.0,
            ),
            // Requester's own profile
            create_candidate(requester, &["Plumbing"], "Home Services", "Pune", 5.0),
            // No term matches
            create_candidate(Uuid::new_v4(), &["Catering"], "Food", "Mumbai", 5.0),
        ];

        let result = matcher.rank(&query, candidates);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.businesses.len(), 1);
        // 5 (one service) + 2 (exact city) + 4 (rating)
        assert_eq!(result.businesses[0].recommendation_score, 11.0);
    }

    #[test]
    fn test_rank_sorts_descending() {
        let matcher = Matcher::with_default_weights();
        let query =
            SearchQuery::new(Some("design".to_string()), None, Uuid::new_v4()).unwrap();

        let candidates = vec![
            create_candidate(Uuid::new_v4(), &["Web Design"], "Retail", "Austin", 0.0),
            create_candidate(
                Uuid::new_v4(),
                &["Web Design", "Graphic Design"],
                "Design Studio",
                "Austin",
                0.0,
            ),
            create_candidate(Uuid::new_v4(), &["Logo Design"], "Retail", "Dallas", 2.0),
        ];

        let result = matcher.rank(&query, candidates);

        assert_eq!(result.businesses.len(), 3);
        for pair in result.businesses.windows(2) {
            assert!(pair[0].recommendation_score >= pair[1].recommendation_score);
        }
        assert_eq!(result.businesses[0].recommendation_score, 13.0);
    }

    #[test]
    fn test_rank_never_drops_low_scores() {
        let matcher = Matcher::with_default_weights();
        let query =
            SearchQuery::new(None, Some("Pune".to_string()), Uuid::new_v4()).unwrap();

        // Substring city match, zero rating: total score 0, still returned
        let candidates = vec![create_candidate(
            Uuid::new_v4(),
            &[],
            "Retail",
            "Pune City",
            0.0,
        )];

        let result = matcher.rank(&query, candidates);

        assert_eq!(result.businesses.len(), 1);
        assert_eq!(result.businesses[0].recommendation_score, 0.0);
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let matcher = Matcher::with_default_weights();
        let query =
            SearchQuery::new(Some("Plumbing".to_string()), None, Uuid::new_v4()).unwrap();

        let older = Utc::now() - chrono::Duration::days(2);
        let newer = Utc::now();

        let mut first = create_candidate(Uuid::new_v4(), &["Plumbing"], "Home", "Pune", 1.0);
        first.created_at = older;
        let mut second = create_candidate(Uuid::new_v4(), &["Plumbing"], "Home", "Pune", 1.0);
        second.created_at = newer;

        let result = matcher.rank(&query, vec![first.clone(), second.clone()]);

        // Equal scores: the newer registration ranks first
        assert_eq!(result.businesses[0].business.id, second.id);
        assert_eq!(result.businesses[1].business.id, first.id);

        // Same outcome regardless of retrieval order
        let reversed = matcher.rank(&query, vec![second.clone(), first.clone()]);
        assert_eq!(reversed.businesses[0].business.id, second.id);
    }

    #[test]
    fn test_empty_candidates_is_success() {
        let matcher = Matcher::with_default_weights();
        let query =
            SearchQuery::new(Some("Plumbing".to_string()), None, Uuid::new_v4()).unwrap();

        let result = matcher.rank(&query, vec![]);

        assert_eq!(result.total_candidates, 0);
        assert!(result.businesses.is_empty());
    }
}
