// Core engine exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod text;

pub use filters::{build_filter, matches_filter};
pub use matcher::{Matcher, SearchResult};
pub use scoring::recommendation_score;
pub use text::{contains_ignore_case, eq_ignore_case};
