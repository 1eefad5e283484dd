use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the identity provider
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Identity provider error: {0}")]
    ApiError(String),

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Identity asserted by the provider for a verified token
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub subject: String,
    pub email: Option<String>,
}

/// Client for the external identity provider
///
/// Tokens stay opaque to this service; every request is verified against
/// the provider's introspection endpoint and only the asserted subject and
/// email are consumed.
pub struct AuthClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl AuthClient {
    /// Create a new identity provider client
    pub fn new(endpoint: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            client,
        }
    }

    /// Extract the token from an Authorization header value
    pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)
    }

    /// Verify a bearer token and return the identity it asserts
    pub async fn verify_token(&self, token: &str) -> Result<TokenIdentity, AuthError> {
        let url = format!(
            "{}/tokeninfo?id_token={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(token)
        );

        tracing::debug!("Verifying token against identity provider");

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidToken);
        }

        if !response.status().is_success() {
            return Err(AuthError::ApiError(format!(
                "Token verification failed with status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;

        let subject = body
            .get("sub")
            .and_then(|sub| sub.as_str())
            .ok_or_else(|| AuthError::InvalidResponse("Missing subject claim".to_string()))?
            .to_string();

        let email = body
            .get("email")
            .and_then(|email| email.as_str())
            .map(str::to_string);

        Ok(TokenIdentity { subject, email })
    }
}
