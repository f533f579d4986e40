// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Protected route, CORS and health tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use session_auth::models::{Role, TokenPayload};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

use common::{create_test_app, json_body, post_json, registration};

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _, _) = create_test_app();

    let response = app.oneshot(get("/api/me", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(get("/api/me", Some("invalid.token.here")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "invalid_token");
}

#[tokio::test]
async fn test_protected_route_rejects_refresh_token() {
    let (app, _, _) = create_test_app();
    let session = json_body(post_json(&app, "/register", registration("a@x.com")).await).await;

    let response = app
        .oneshot(get("/api/me", session["refreshToken"].as_str()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "invalid_token");
}

#[tokio::test]
async fn test_protected_route_with_non_bearer_scheme() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::AUTHORIZATION, "Basic YTpi")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let (app, _, _) = create_test_app();
    let session = json_body(post_json(&app, "/register", registration("a@x.com")).await).await;

    let response = app
        .clone()
        .oneshot(get("/api/me", session["accessToken"].as_str()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["id"], session["user"]["id"]);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_valid_token_for_deleted_user() {
    let (app, state, _) = create_test_app();
    let pair = state
        .auth_service
        .tokens()
        .issue_pair(&TokenPayload {
            user_id: Uuid::new_v4(),
            email: "ghost@x.com".to_string(),
            role: Role::User,
        })
        .unwrap();

    let response = app
        .oneshot(get("/api/me", Some(&pair.access_token)))
        .await
        .unwrap();

    // Authentication passed; the user just isn't there
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/login")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_health_no_auth_required() {
    let (app, _, _) = create_test_app();

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["uptime_secs"].is_u64());
    assert!(body["timestamp"].is_string());
}
