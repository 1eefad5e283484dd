use crate::core::text::contains_ignore_case;
use crate::models::{BusinessProfile, ProfileFilter, SearchQuery};

/// Build the candidate filter for a query
///
/// Pure construction: the returned filter is an immutable description of the
/// constraints, independent of where they get evaluated (SQL pre-filter or
/// the in-process predicate below).
pub fn build_filter(query: &SearchQuery) -> ProfileFilter {
    ProfileFilter {
        exclude_owner: query.requester,
        service: query.service.clone(),
        city: query.city.clone(),
    }
}

/// Check whether a profile qualifies as a search candidate
///
/// A profile is a candidate when it is not owned by the requester, at least
/// one offered service contains the service term, and the city contains the
/// city term. Absent terms leave their dimension unconstrained; both matches
/// are case-insensitive literal substring checks.
#[inline]
pub fn matches_filter(profile: &BusinessProfile, filter: &ProfileFilter) -> bool {
    // A business never appears in its own search results
    if profile.owner_id == filter.exclude_owner {
        return false;
    }

    if let Some(service) = &filter.service {
        let offers_service = profile
            .services_offered
            .iter()
            .any(|offered| contains_ignore_case(offered, service));
        if !offers_service {
            return false;
        }
    }

    if let Some(city) = &filter.city {
        if !contains_ignore_case(&profile.location.city, city) {
            return false;
        }
    }

    true
}
