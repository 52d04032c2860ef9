//! Route configuration and setup

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use pactscan_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Multipart framing overhead allowed on top of the contract size ceiling.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config);
    let auth_state = Arc::new(AuthState::new(&config.jwt_secret));

    let public_routes = public_routes();

    // State is applied inside protected_routes() so handlers taking Multipart
    // still typecheck.
    let protected_routes = protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(auth_state, auth_middleware),
    );

    let app = public_routes
        .merge(protected_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(RequestBodyLimitLayer::new(
            config.max_contract_size_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    }
}

/// Public routes (no authentication required)
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Protected routes (require a valid session token).
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/contracts/detect-type",
            post(handlers::detect_type::detect_contract_type),
        )
        .route(
            "/api/contracts/analyze",
            post(handlers::analyze::analyze_contract),
        )
        .route("/api/contracts", get(handlers::contracts::list_contracts))
        .route(
            "/api/contracts/{id}",
            get(handlers::contracts::get_contract),
        )
        .route(
            "/api/auth/current-user",
            get(handlers::current_user::current_user),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::SessionClaims;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use pactscan_ai::{ModelError, TextModel};
    use pactscan_db::{AnalysisRepository, CachedAnalysisStore};
    use pactscan_stage::MemoryStage;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;
    use tower::ServiceExt;
    use uuid::Uuid;

    const JWT_SECRET: &str = "routes-test-secret";

    struct NoopModel;

    #[async_trait::async_trait]
    impl TextModel for NoopModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::EmptyResponse)
        }

        fn model_id(&self) -> &str {
            "noop"
        }
    }

    fn test_config() -> Config {
        Config {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            database_url: "postgresql://localhost/pactscan_test".to_string(),
            db_max_connections: 1,
            db_timeout_seconds: 1,
            jwt_secret: JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-pro".to_string(),
            stage_ttl_secs: 60,
            record_cache_ttl_secs: 60,
            max_contract_size_bytes: 1024 * 1024,
        }
    }

    /// Router over a lazy pool: no connection happens until a query runs,
    /// and the requests below are rejected before any query.
    fn test_router() -> Router {
        let config = test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let repository = AnalysisRepository::new(pool.clone());
        let state = Arc::new(AppState {
            config: config.clone(),
            pool,
            stage: Arc::new(MemoryStage::new()),
            model: Arc::new(NoopModel),
            analyses: CachedAnalysisStore::new(repository, Duration::from_secs(60)),
        });
        setup_routes(&config, state).unwrap()
    }

    fn bearer_token() -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "u@example.com".to_string(),
            name: None,
            plan: "free".to_string(),
            exp: now + 3600,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_contract_id_yields_400_error_body() {
        let request = Request::builder()
            .uri("/api/contracts/not-a-valid-id")
            .header("Authorization", format!("Bearer {}", bearer_token()))
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_INPUT");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_bearer_token_yields_401() {
        let request = Request::builder()
            .uri("/api/contracts")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_garbage_bearer_token_yields_401() {
        let request = Request::builder()
            .uri("/api/contracts")
            .header("Authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
