// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use session_auth::config::Config;
use session_auth::db::{MemoryUserStore, PgUserStore};
use session_auth::routes::create_router;
use session_auth::services::{AuthService, PasswordHasher, TokenIssuer};
use session_auth::AppState;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

/// Postgres URL for store tests, if one is configured.
#[allow(dead_code)]
pub fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Skip test with message if no Postgres is configured.
#[macro_export]
macro_rules! require_database {
    () => {
        if crate::common::database_url().is_none() {
            eprintln!("⚠️  Skipping: TEST_DATABASE_URL not set");
            return;
        }
    };
}

/// Connect to the configured test database and run migrations.
#[allow(dead_code)]
pub async fn test_pg_store() -> PgUserStore {
    let url = database_url().expect("TEST_DATABASE_URL not set");
    PgUserStore::connect(&url, 2)
        .await
        .expect("Failed to connect to test database")
}

/// Create a test app over an in-memory store.
/// Returns the router, the shared state and the store for inspection.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryUserStore>) {
    let config = Config::test_default();
    let store = Arc::new(MemoryUserStore::new());

    let auth_service = AuthService::new(
        store.clone(),
        PasswordHasher::new(),
        TokenIssuer::new(&config),
    );

    let state = Arc::new(AppState {
        config,
        auth_service,
        started_at: Instant::now(),
    });

    (create_router(state.clone()), state, store)
}

/// Send a JSON POST through the router.
#[allow(dead_code)]
pub async fn post_json(app: &axum::Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registration body used across tests.
#[allow(dead_code)]
pub fn registration(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "pw123456",
        "first_name": "A",
        "last_name": "B",
        "date_of_birth": "2000-01-01"
    })
}
