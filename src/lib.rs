// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Session-auth: credential checks and signed session tokens.
//!
//! This crate provides the backend API for logging in, registering users,
//! rotating refresh tokens and reporting service health.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::AuthService;
use std::time::Instant;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}
