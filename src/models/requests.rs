use crate::models::domain::Location;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Raw search parameters as supplied by the caller
///
/// Both terms are optional here; the at-least-one rule is enforced when the
/// parameters are turned into a `SearchQuery`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Request to register a business profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBusinessRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "business_name", rename = "businessName")]
    pub business_name: String,
    #[validate(length(min = 1))]
    pub industry: String,
    #[validate(custom(function = "validate_location"))]
    pub location: Location,
    #[serde(alias = "services_offered", rename = "servicesOffered", default)]
    pub services_offered: Vec<String>,
    #[serde(alias = "services_required", rename = "servicesRequired", default)]
    pub services_required: Vec<String>,
    #[serde(alias = "pricing_range", rename = "pricingRange", default)]
    pub pricing_range: Option<String>,
}

fn validate_location(location: &Location) -> Result<(), ValidationError> {
    if location.city.trim().is_empty() {
        return Err(ValidationError::new("city_required"));
    }
    Ok(())
}
