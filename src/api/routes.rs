//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::ApiConfig;
use crate::state::AppState;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/api/v2/members` - Member operations
/// - `/api/v1/members` - Legacy member operations, only with `enable_legacy_v1`
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState, api: &ApiConfig, request_timeout: Duration) -> Router {
    let mut openapi_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v2", handlers::members::member_routes());

    if api.enable_legacy_v1 {
        tracing::warn!("Legacy v1 member endpoints enabled");
        openapi_router =
            openapi_router.nest("/api/v1", handlers::legacy_members::legacy_member_routes());
    }

    let (router, openapi) = openapi_router.split_for_parts();

    let mut router = router.with_state(state);
    if api.enable_swagger {
        router = router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi));
    }

    with_middleware(router, request_timeout)
}

/// Wraps a router in the shared middleware stack.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Compression - encodes the final body, after error normalization
/// 2. CORS
/// 3. Request ID middleware - generates/propagates request IDs
/// 4. Logging middleware - logs requests with request IDs
/// 5. Global error handler - normalizes error bodies and stamps the request ID
/// 6. Timeout - answers 408 once `request_timeout` elapses
fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}
