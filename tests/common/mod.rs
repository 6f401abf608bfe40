//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router against a fresh in-memory database.
//! Methods are intentionally broad to support the various test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tower::ServiceExt;
use yieldbook::cache::cache_invalidation_middleware;
use yieldbook::config::{Config, DEFAULT_OWNER};
use yieldbook::db::{create_in_memory_pool, run_migrations};
use yieldbook::handlers;
use yieldbook::owner::OWNER_HEADER;
use yieldbook::state::AppState;

pub struct TestClient {
    state: AppState,
    owner: Option<String>,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database. Requests
    /// carry no owner header, so they act as the default owner.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            run_migrations(&conn, Path::new("migrations")).expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
            default_owner: DEFAULT_OWNER.into(),
        };

        Self {
            state: AppState::new(pool, config),
            owner: None,
        }
    }

    /// A client sharing this client's database but sending `owner` in the
    /// owner header.
    pub fn as_owner(&self, owner: &str) -> Self {
        Self {
            state: self.state.clone(),
            owner: Some(owner.to_string()),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The router with the same middleware as production.
    pub fn router(&self) -> Router {
        handlers::routes()
            .fallback(handlers::fallback)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                cache_invalidation_middleware,
            ))
            .with_state(self.state.clone())
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(owner) = &self.owner {
            builder = builder.header(OWNER_HEADER, owner);
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send("GET", uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, String) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, String) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.send("DELETE", uri, None).await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
        (status, parsed)
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create a company and return its id.
    pub async fn create_company(&self, portfolio: &str, name: &str) -> String {
        let (status, body) = self
            .post_json(
                &format!("/api/{}/companies", portfolio),
                serde_json::json!({ "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create company failed: {}", body);
        let value: Value = serde_json::from_str(&body).unwrap();
        value["id"].as_str().unwrap().to_string()
    }

    /// Record a payment and return its id.
    pub async fn record_payment(
        &self,
        portfolio: &str,
        company_id: &str,
        amount: f64,
        date: &str,
    ) -> String {
        let (status, body) = self
            .post_json(
                &format!("/api/{}/payments", portfolio),
                serde_json::json!({
                    "company_id": company_id,
                    "amount": amount,
                    "payment_date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "record payment failed: {}", body);
        let value: Value = serde_json::from_str(&body).unwrap();
        value["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
