use crate::core::text::{contains_ignore_case, eq_ignore_case};
use crate::models::{BusinessProfile, ScoreWeights, SearchQuery};

/// Calculate the relevance score for a candidate profile
///
/// Scoring components, each applied only when its query term was supplied:
/// * +`weights.service` (5) for every offered service containing the service
///   term — additive over entries, a profile offering three matching
///   services scores 15 here
/// * +`weights.industry` (3) when the industry contains the service term
/// * +`weights.city` (2) when the city equals the city term exactly
///   (case-insensitive equality, deliberately stricter than the substring
///   filter on the same field)
/// * +`rating` unconditionally
pub fn recommendation_score(
    profile: &BusinessProfile,
    query: &SearchQuery,
    weights: &ScoreWeights,
) -> f64 {
    let mut score = 0.0;

    if let Some(service) = &query.service {
        for offered in &profile.services_offered {
            if contains_ignore_case(offered, service) {
                score += weights.service;
            }
        }

        if contains_ignore_case(&profile.industry, service) {
            score += weights.industry;
        }
    }

    if let Some(city) = &query.city {
        if eq_ignore_case(&profile.location.city, city) {
            score += weights.city;
        }
    }

    score + profile.rating
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_profile(
        services: &[&str],
        industry: &str,
        city: &str,
        rating: f64,
    ) -> BusinessProfile {
        BusinessProfile {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            business_name: "Test Business".to_string(),
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

    fn query(service: Option<&str>, city: Option<&str>) -> SearchQuery {
        SearchQuery::new(
            service.map(|s| s.to_string()),
            city.map(|c| c.to_string()),
            Uuid::new_v4(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_service_match_with_city_and_rating() {
        // 5 (one service) + 2 (exact city) + 4 (rating) = 11
        let profile = create_test_profile(
            &["Plumbing", "Electrical"],
            "Home Services",
            "Pune",
            4.0,
        );
        let query = query(Some("Plumbing"), Some("Pune"));

        let score = recommendation_score(&profile, &query, &ScoreWeights::default());
        assert_eq!(score, 11.0);
    }

    #[test]
    fn test_service_matches_are_additive() {
        // 5 + 5 (two services) + 3 (industry contains "design") + 0 = 13
        let profile = create_test_profile(
            &["Web Design", "Graphic Design"],
            "Design Studio",
            "Austin",
            0.0,
        );
        let query = query(Some("design"), None);

        let score = recommendation_score(&profile, &query, &ScoreWeights::default());
        assert_eq!(score, 13.0);
    }

    #[test]
    fn test_city_bonus_requires_exact_match() {
        let exact = create_test_profile(&[], "Retail", "Pune", 0.0);
        let superstring = create_test_profile(&[], "Retail", "Pune City", 0.0);
        let query = query(None, Some("Pune"));
        let weights = ScoreWeights::default();

        assert_eq!(recommendation_score(&exact, &query, &weights), 2.0);
        // Substring city passes the filter but earns no exact-match bonus
        assert_eq!(recommendation_score(&superstring, &query, &weights), 0.0);
    }

    #[test]
    fn test_industry_bonus_only_with_service_term() {
        let profile = create_test_profile(&[], "Design Studio", "Austin", 0.0);
        let weights = ScoreWeights::default();

        let with_service = query(Some("design"), None);
        assert_eq!(recommendation_score(&profile, &with_service, &weights), 3.0);

        let city_only = query(None, Some("Austin"));
        assert_eq!(recommendation_score(&profile, &city_only, &weights), 2.0);
    }

    #[test]
    fn test_rating_always_counts() {
        let profile = create_test_profile(&["Catering"], "Food", "Mumbai", 5.0);
        let query = query(Some("plumbing"), None);

        // No term matches at all, the rating still carries through
        let score = recommendation_score(&profile, &query, &ScoreWeights::default());
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_empty_services_contribute_zero() {
        let profile = create_test_profile(&[], "Home Services", "Pune", 3.0);
        let query = query(Some("Plumbing"), Some("Pune"));

        // 0 (services) + 0 (industry) + 2 (city) + 3 (rating)
        let score = recommendation_score(&profile, &query, &ScoreWeights::default());
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_case_insensitive_scoring() {
        let profile = create_test_profile(&["Plumbing"], "Home Services", "Pune", 1.0);
        let weights = ScoreWeights::default();

        for term in ["plumbing", "PLUMBING", "PlUmBiNg"] {
            let query = query(Some(term), Some("pUnE"));
            assert_eq!(recommendation_score(&profile, &query, &weights), 8.0);
        }
    }
}
