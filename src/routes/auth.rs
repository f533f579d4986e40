// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: login, registration and token refresh.
//!
//! Handlers only parse the body and call [`AuthService`](crate::services::AuthService);
//! errors are formatted by `AppError`'s `IntoResponse` impl.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh", post(refresh))
}

/// Exchange email and password for a token pair.
async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(req) = payload?;
    Ok(Json(state.auth_service.login(req).await?))
}

/// Create an account; responds 201 with a token pair.
async fn register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(req) = payload?;
    let resp = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// Rotate a refresh token into a new pair.
async fn refresh(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(req) = payload?;
    Ok(Json(state.auth_service.refresh(req).await?))
}
