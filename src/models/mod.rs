// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BusinessProfile, Location, ProfileFilter, QueryError, ScoreWeights, ScoredBusiness,
    SearchQuery,
};
pub use requests::{RegisterBusinessRequest, SearchParams};
pub use responses::{
    BusinessListResponse, ErrorResponse, HealthResponse, RegisterBusinessResponse, SearchResponse,
};
