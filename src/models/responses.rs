use crate::models::domain::{BusinessProfile, ScoredBusiness};
use serde::{Deserialize, Serialize};

/// Response for the partner search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub businesses: Vec<ScoredBusiness>,
}

/// Response for the listing endpoints (own profiles, recent profiles)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessListResponse {
    pub count: usize,
    pub businesses: Vec<BusinessProfile>,
}

/// Response after registering a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterBusinessResponse {
    pub message: String,
    pub business: BusinessProfile,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
