// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-auth API Server
//!
//! Validates credentials against the `users` table and hands out signed
//! access/refresh token pairs.

use session_auth::{
    config::Config,
    db::PgUserStore,
    services::{AuthService, PasswordHasher, TokenIssuer},
    AppState,
};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Instant::now();

    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting session-auth API");

    // Connection pool lives for the whole process; the store borrows from it per query
    let store = PgUserStore::connect(&config.database_url, config.database_max_connections).await?;

    let auth_service = AuthService::new(
        Arc::new(store),
        PasswordHasher::new(),
        TokenIssuer::new(&config),
    );
    tracing::info!(
        access_ttl_secs = config.access_token_ttl_secs,
        refresh_ttl_secs = config.refresh_token_ttl_secs,
        "Auth service initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        auth_service,
        started_at,
    });

    // Build router
    let app = session_auth::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("session_auth=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
