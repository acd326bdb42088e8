//! Router harness over in-memory repositories.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::routes::create_router;
use crate::config::ApiConfig;
use crate::repositories::Repositories;
use crate::repositories::memory::{InMemoryMemberRepository, InMemoryOrderRepository};
use crate::services::Services;
use crate::state::AppState;

pub struct TestApp {
    router: Router,
    members: Arc<InMemoryMemberRepository>,
}

impl TestApp {
    pub fn new(enable_legacy_v1: bool) -> Self {
        Self::with_config(ApiConfig {
            enable_legacy_v1,
            ..ApiConfig::default()
        })
    }

    pub fn with_config(api: ApiConfig) -> Self {
        let members = Arc::new(InMemoryMemberRepository::default());
        let repos = Repositories::from_parts(
            members.clone(),
            Arc::new(InMemoryOrderRepository::default()),
        );
        let state = AppState::from_services(Services::new(repos));
        Self {
            router: create_router(state, &api, Duration::from_secs(30)),
            members,
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub async fn raw(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.raw(request).await;
        (response.status(), json_body(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }
}

/// Response body as JSON, or `Null` when empty or not JSON.
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
