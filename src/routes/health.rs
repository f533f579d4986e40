// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Liveness reporting.

use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub build_id: String,
    pub timestamp: String,
}

/// Build the health payload. No I/O; touches nothing but its arguments.
pub fn report(uptime: Duration, now: DateTime<Utc>) -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        uptime_secs: uptime.as_secs(),
        build_id: option_env!("BUILD_ID").unwrap_or("unknown").to_string(),
        timestamp: format_utc_rfc3339(now),
    }
}

/// Health check response
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(report(state.started_at.elapsed(), Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let health = report(Duration::from_millis(90_500), now);

        assert_eq!(health.status, "ok");
        assert_eq!(health.uptime_secs, 90);
        assert_eq!(health.timestamp, "2026-03-01T12:00:00Z");
    }
}
