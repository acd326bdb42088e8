//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API.
//! Server-side failures are sanitized; their sources are only logged.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate → 409 CONFLICT
    /// - Validation / ValidationErrors / BadRequest → 400 BAD_REQUEST
    /// - Database / Configuration / Internal → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }
        (status, Json(error_to_body(&self))).into_response()
    }
}

/// Builds the response body for an error, without request correlation.
pub fn error_to_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
        AppError::BadRequest { message } => ErrorResponse::new(error_to_code(error), message),
        AppError::Database { operation, .. } => ErrorResponse::new(
            error_to_code(error),
            &format!("Database operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => ErrorResponse::new(
            error_to_code(error),
            &format!("Configuration error: {}", key),
        )
        .with_details(json!({ "key": key })),
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(error_to_code(error), "Database connection unavailable")
        }
        AppError::Internal { .. } => {
            ErrorResponse::new(error_to_code(error), "An internal error occurred")
        }
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(_) => "Invalid JSON body",
            JsonRejection::JsonSyntaxError(_) => "JSON syntax error",
            JsonRejection::MissingJsonContentType(_) => "Missing or invalid Content-Type header",
            JsonRejection::BytesRejection(_) => "Failed to read request body",
            _ => "Failed to parse JSON request",
        };
        AppError::BadRequest {
            message: format!("{}: {}", message, rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid path parameters: {}", rejection.body_text()),
        }
    }
}

/// Global error handling middleware.
///
/// Gives framework-generated errors (unknown route, wrong method) the same
/// JSON shape as `AppError`, and stamps every error body with the request id.
/// Must run inside `request_id_middleware`.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    // Encoded bodies cannot be parsed or rewritten
    if response.headers().contains_key(header::CONTENT_ENCODING) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let parsed = if is_json {
        serde_json::from_slice::<ErrorResponse>(&body_bytes).ok()
    } else {
        None
    };

    let mut error_response = match parsed {
        Some(error_response) => error_response,
        None if is_json => {
            // Some other JSON payload; leave it untouched
            return Response::from_parts(parts, axum::body::Body::from(body_bytes));
        }
        None => {
            let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();
            fallback_error(status, original_message)
        }
    };

    if let Some(id) = request_id {
        error_response = error_response.with_request_id(&id);
    }

    let mut rebuilt = (status, Json(error_response)).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rebuilt.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rebuilt
}

fn fallback_error(status: StatusCode, original_message: String) -> ErrorResponse {
    let (code, default_message) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timed out"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::SERVICE_UNAVAILABLE => {
            ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        s if s.is_server_error() => ("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };

    // Never echo server-side bodies back to the client
    let message = if original_message.is_empty() || status.is_server_error() {
        default_message.to_string()
    } else {
        original_message
    };
    ErrorResponse::new(code, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, middleware, routing::get};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_not_found_status_code() {
        let error = AppError::not_found_by_id("member", 123);
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error_to_code(&error), "NOT_FOUND");
    }

    #[test]
    fn test_duplicate_status_code() {
        let error = AppError::Duplicate {
            entity: "member".to_string(),
            field: "name".to_string(),
            value: "Alice".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error_to_code(&error), "DUPLICATE_ENTRY");
    }

    #[test]
    fn test_validation_status_codes() {
        let single = AppError::Validation {
            field: "name".to_string(),
            reason: "empty".to_string(),
        };
        let many = AppError::ValidationErrors { errors: vec![] };
        assert_eq!(error_to_status_code(&single), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_status_code(&many), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_code(&many), "VALIDATION_ERROR");
    }

    #[test]
    fn test_connection_pool_status_code() {
        let error = AppError::ConnectionPool {
            source: anyhow::anyhow!("Pool exhausted"),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_to_code(&error), "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_database_error_sanitization() {
        let error = AppError::Database {
            operation: "select members".to_string(),
            source: anyhow::anyhow!("password=hunter2"),
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "DATABASE_ERROR");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_internal_error_sanitization() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("stack trace with secrets"),
        };
        let body = body_json(error.into_response()).await;
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_global_handler_converts_plain_404_and_adds_request_id() {
        let app = Router::new()
            .route("/known", get(|| async { "ok" }))
            .layer(middleware::from_fn(global_error_handler))
            .layer(middleware::from_fn(super::super::request_id_middleware));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/unknown")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-request-id"], "req-42");
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["request_id"], "req-42");
    }

    #[tokio::test]
    async fn test_global_handler_stamps_app_error_body() {
        let app = Router::new()
            .route(
                "/missing",
                get(|| async { Err::<(), _>(AppError::not_found_by_id("member", 999)) }),
            )
            .layer(middleware::from_fn(global_error_handler))
            .layer(middleware::from_fn(super::super::request_id_middleware));

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let generated = response.headers()["x-request-id"].to_str().unwrap().to_string();
        let body = body_json(response).await;
        assert_eq!(body["details"]["value"], "999");
        assert_eq!(body["request_id"], generated);
    }

    #[tokio::test]
    async fn test_global_handler_leaves_encoded_body_alone() {
        let app = Router::new()
            .route(
                "/encoded",
                get(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        [(header::CONTENT_ENCODING, "gzip")],
                        vec![0x1f_u8, 0x8b, 0x08],
                    )
                }),
            )
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/encoded").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], &[0x1f, 0x8b, 0x08]);
    }

    #[test]
    fn test_fallback_error_for_timeout() {
        let body = fallback_error(StatusCode::REQUEST_TIMEOUT, String::new());
        assert_eq!(body.code, "REQUEST_TIMEOUT");
        assert_eq!(body.message, "Request timed out");
    }

    #[tokio::test]
    async fn test_global_handler_passes_success_through() {
        let app = Router::new()
            .route("/known", get(|| async { "ok" }))
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/known").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
