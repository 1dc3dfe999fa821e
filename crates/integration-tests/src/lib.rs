//! Shared harness for the end-to-end API tests.
//!
//! Spins up the full router over a JSON file store in a temp directory
//! and drives it in-process with `tower::ServiceExt::oneshot`. No port
//! is bound, so tests run in parallel without clashing.

#![cfg(feature = "web-axum")]

use std::sync::Arc;

use api_adapters::{router, AppState};
use auth_adapters::Argon2AuthProvider;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use storage_adapters::JsonFileRepo;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

/// A throwaway app over its own store file. The `TempDir` must outlive
/// the router or the store's directory disappears mid-test.
pub struct TestApp {
    router: Router,
    _data_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("temp dir");
        let repo = JsonFileRepo::open(data_dir.path().join("db.json")).expect("file store");
        let state = AppState::new(Arc::new(repo), Arc::new(Argon2AuthProvider::new()));
        Self {
            router: router(state),
            _data_dir: data_dir,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", path, Some(body)).await
    }

    async fn send(&self, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    /// Registers `{name}@example.com` with the demo password and
    /// returns the new profile id.
    pub async fn register(&self, name: &str, relationship_status: &str) -> Uuid {
        let (status, body) = self
            .post(
                "/auth/register",
                json!({
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "password": "demo123",
                    "name": name,
                    "relationshipStatus": relationship_status,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {name}: {body}");
        body["user"]["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("profile id")
    }

    /// Swipes and returns the `match` field of the response.
    pub async fn swipe(&self, from: Uuid, to: Uuid, direction: &str) -> Value {
        let (status, body) = self
            .post(
                "/swipes",
                json!({
                    "fromUserId": from,
                    "toUserId": to,
                    "direction": direction,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "swipe: {body}");
        body["match"].clone()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
