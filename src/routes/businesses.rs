use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{build_filter, Matcher};
use crate::models::{
    BusinessListResponse, ErrorResponse, HealthResponse, RegisterBusinessRequest,
    RegisterBusinessResponse, SearchParams, SearchQuery, SearchResponse,
};
use crate::services::{AuthClient, AuthError, DirectoryStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DirectoryStore>,
    pub auth: Arc<AuthClient>,
    pub matcher: Matcher,
    pub recent_limit: i64,
}

/// Configure all business-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/businesses", web::post().to(register_business))
        .route("/businesses/search", web::get().to(search_businesses))
        .route("/businesses/mine", web::get().to(my_businesses))
        .route("/businesses/recent", web::get().to(recent_businesses));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Check PostgreSQL health
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve the calling user from the Authorization header
///
/// Verifies the bearer token with the identity provider and maps the
/// asserted subject to a local user id, creating that user on first sight.
async fn authenticate(state: &AppState, req: &HttpRequest) -> Result<Uuid, HttpResponse> {
    let header_value = match req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(value) => value,
        None => {
            return Err(HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Missing authorization".to_string(),
                message: "Authorization header with a bearer token is required".to_string(),
                status_code: 401,
            }));
        }
    };

    let token = match AuthClient::bearer_token(header_value) {
        Ok(token) => token,
        Err(e) => {
            return Err(HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Invalid authorization".to_string(),
                message: e.to_string(),
                status_code: 401,
            }));
        }
    };

    let identity = match state.auth.verify_token(token).await {
        Ok(identity) => identity,
        Err(AuthError::InvalidToken) => {
            return Err(HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Invalid token".to_string(),
                message: "Token verification failed".to_string(),
                status_code: 401,
            }));
        }
        Err(e) => {
            tracing::error!("Identity provider request failed: {}", e);
            return Err(HttpResponse::BadGateway().json(ErrorResponse {
                error: "Identity provider unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            }));
        }
    };

    match state
        .store
        .find_or_create_user(&identity.subject, identity.email.as_deref())
        .await
    {
        Ok(user_id) => Ok(user_id),
        Err(e) => {
            tracing::error!("Failed to resolve user record: {}", e);
            Err(HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to resolve user".to_string(),
                message: e.to_string(),
                status_code: 500,
            }))
        }
    }
}

/// Register a business endpoint
///
/// POST /api/v1/businesses
///
/// Request body:
/// ```json
/// {
///   "businessName": "string",
///   "industry": "string",
///   "location": { "city": "string", "state": "string" },
///   "servicesOffered": ["string"],
///   "servicesRequired": ["string"],
///   "pricingRange": "string"
/// }
/// ```
async fn register_business(
    state: web::Data<AppState>,
    req: web::Json<RegisterBusinessRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let user_id = match authenticate(&state, &http_req).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for register request: field_errors={:?}",
            errors
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.store.insert_business(user_id, &req).await {
        Ok(business) => {
            tracing::info!("Registered business {} for owner {}", business.id, user_id);
            HttpResponse::Created().json(RegisterBusinessResponse {
                message: "Business registered successfully".to_string(),
                business,
            })
        }
        Err(e) => {
            tracing::error!("Failed to register business for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to register business".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Partner search endpoint
///
/// GET /api/v1/businesses/search?service={term}&city={term}
///
/// At least one of the two terms must be present and non-blank. The caller's
/// own businesses never appear in the result, and every surviving candidate
/// comes back ranked, highest score first.
async fn search_businesses(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
    http_req: HttpRequest,
) -> impl Responder {
    let user_id = match authenticate(&state, &http_req).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    // Validate terms before touching the store
    let query = match SearchQuery::new(params.service.clone(), params.city.clone(), user_id) {
        Ok(query) => query,
        Err(e) => {
            tracing::info!("Rejected search without usable terms for user {}", user_id);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid search".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Searching partners for user {}: service={:?}, city={:?}",
        user_id,
        query.service,
        query.city
    );

    let filter = build_filter(&query);

    let candidates = match state.store.find_candidates(&filter).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to retrieve candidates for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to retrieve candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Retrieved {} candidates for {}", candidates.len(), user_id);

    // Run the ranking pipeline
    let result = state.matcher.rank(&query, candidates);

    let count = result.businesses.len();
    let response = SearchResponse {
        count,
        businesses: result.businesses,
    };

    tracing::info!(
        "Returning {} ranked partners for user {} (from {} candidates)",
        count,
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// List the caller's own businesses
///
/// GET /api/v1/businesses/mine
async fn my_businesses(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let user_id = match authenticate(&state, &http_req).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.store.list_by_owner(user_id).await {
        Ok(businesses) => HttpResponse::Ok().json(BusinessListResponse {
            count: businesses.len(),
            businesses,
        }),
        Err(e) => {
            tracing::error!("Failed to list businesses for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list businesses".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List recently registered businesses across all owners
///
/// GET /api/v1/businesses/recent
async fn recent_businesses(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let user_id = match authenticate(&state, &http_req).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.store.list_recent(state.recent_limit).await {
        Ok(businesses) => HttpResponse::Ok().json(BusinessListResponse {
            count: businesses.len(),
            businesses,
        }),
        Err(e) => {
            tracing::error!("Failed to list recent businesses for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list recent businesses".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
