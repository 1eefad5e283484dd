use crate::models::{BusinessProfile, Location, ProfileFilter, RegisterBusinessRequest};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with the directory store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL-backed directory store
///
/// Holds the registered business profiles and the local user records that
/// map identity-provider subjects to owner ids. Candidate retrieval pushes
/// the filter into SQL as a coarse pre-filter; the in-process predicate in
/// `core::filters` re-checks every returned row.
pub struct DirectoryStore {
    pool: PgPool,
}

impl DirectoryStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Find the local user for an identity-provider subject, creating it on
    /// first sight
    ///
    /// Uses INSERT ... ON CONFLICT so repeated logins are a single round
    /// trip; a fresh email from the provider replaces a stale one.
    pub async fn find_or_create_user(
        &self,
        subject: &str,
        email: Option<&str>,
    ) -> Result<Uuid, StoreError> {
        let query = r#"
            INSERT INTO users (subject, email)
            VALUES ($1, $2)
            ON CONFLICT (subject)
            DO UPDATE SET email = COALESCE(EXCLUDED.email, users.email)
            RETURNING id
        "#;

        let row = sqlx::query(query)
            .bind(subject)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("id"))
    }

    /// Insert a newly registered business profile
    pub async fn insert_business(
        &self,
        owner_id: Uuid,
        request: &RegisterBusinessRequest,
    ) -> Result<BusinessProfile, StoreError> {
        let query = r#"
            INSERT INTO businesses (
                owner_id, business_name, industry, city, state,
                services_offered, services_required, pricing_range
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, business_name, industry, city, state,
                      services_offered, services_required, pricing_range,
                      verified, rating, created_at
        "#;

        let row = sqlx::query(query)
            .bind(owner_id)
            .bind(&request.business_name)
            .bind(&request.industry)
            .bind(&request.location.city)
            .bind(&request.location.state)
            .bind(&request.services_offered)
            .bind(&request.services_required)
            .bind(&request.pricing_range)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(
            "Registered business {} for owner {}",
            request.business_name,
            owner_id
        );

        Ok(row_to_business(&row))
    }

    /// Retrieve the candidate set for a search filter
    ///
    /// The keyword conditions run as ILIKE against literal-escaped patterns,
    /// so user input never acts as a pattern language. Rows come back
    /// unordered; ordering is the ranker's job.
    pub async fn find_candidates(
        &self,
        filter: &ProfileFilter,
    ) -> Result<Vec<BusinessProfile>, StoreError> {
        let query = r#"
            SELECT id, owner_id, business_name, industry, city, state,
                   services_offered, services_required, pricing_range,
                   verified, rating, created_at
            FROM businesses
            WHERE owner_id <> $1
              AND ($2::text IS NULL OR EXISTS (
                    SELECT 1 FROM unnest(services_offered) AS offered
                    WHERE offered ILIKE $2
              ))
              AND ($3::text IS NULL OR city ILIKE $3)
        "#;

        let service_pattern = filter.service.as_deref().map(like_pattern);
        let city_pattern = filter.city.as_deref().map(like_pattern);

        let rows = sqlx::query(query)
            .bind(filter.exclude_owner)
            .bind(service_pattern)
            .bind(city_pattern)
            .fetch_all(&self.pool)
            .await?;

        let candidates: Vec<BusinessProfile> = rows.iter().map(row_to_business).collect();

        tracing::debug!("Retrieved {} candidates", candidates.len());

        Ok(candidates)
    }

    /// List the profiles owned by a user, newest first
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<BusinessProfile>, StoreError> {
        let query = r#"
            SELECT id, owner_id, business_name, industry, city, state,
                   services_offered, services_required, pricing_range,
                   verified, rating, created_at
            FROM businesses
            WHERE owner_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_business).collect())
    }

    /// List the most recently registered profiles across all owners
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<BusinessProfile>, StoreError> {
        let query = r#"
            SELECT id, owner_id, business_name, industry, city, state,
                   services_offered, services_required, pricing_range,
                   verified, rating, created_at
            FROM businesses
            ORDER BY created_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_business).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn row_to_business(row: &PgRow) -> BusinessProfile {
    BusinessProfile {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        business_name: row.get("business_name"),
        industry: row.get("industry"),
        location: Location {
            city: row.get("city"),
            state: row.get("state"),
        },
        services_offered: row.get("services_offered"),
        services_required: row.get("services_required"),
        pricing_range: row.get("pricing_range"),
        verified: row.get("verified"),
        rating: row.get("rating"),
        created_at: row.get("created_at"),
    }
}

/// Build an ILIKE pattern that matches the term as literal text
fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Escape LIKE metacharacters so a term cannot act as a wildcard pattern
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passes_plain_terms() {
        assert_eq!(escape_like("Plumbing"), "Plumbing");
        assert_eq!(like_pattern("Plumbing"), "%Plumbing%");
    }

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
