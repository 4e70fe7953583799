//! Health check handler

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::AppState;

/// Service health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let uptime = state.started_at.elapsed().as_secs();

    let database = match &state.db {
        None => ComponentHealth {
            status: "in-memory".to_string(),
            latency_ms: None,
        },
        Some(db) => {
            let started = Instant::now();
            match db.ping().await {
                Ok(()) => ComponentHealth {
                    status: "healthy".to_string(),
                    latency_ms: Some(started.elapsed().as_millis() as u64),
                },
                Err(e) => {
                    warn!(error = %e, "Database ping failed");
                    ComponentHealth {
                        status: "unreachable".to_string(),
                        latency_ms: None,
                    }
                }
            }
        }
    };

    let healthy = database.status != "unreachable";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        database,
    };

    if healthy {
        (StatusCode::OK, Json(ApiResponse::success(response)))
    } else {
        let mut body = ApiResponse::with_message("Database unreachable", response);
        body.success = false;
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    }
}
