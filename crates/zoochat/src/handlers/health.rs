//! Health check endpoints for Kubernetes-style health checks.
//!
//! - `/livez` - Basic liveness check (immediate 200, no checks)
//! - `/readyz` - Readiness check (storage round trip)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::context::RequestContext;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReadinessStatus {
    pub healthy: bool,
    pub latency_ms: u64,
    pub chat_backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /livez - Basic liveness check.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness check.
///
/// Returns 200 when storage answers, 503 otherwise. The failure detail is
/// only shown to admins.
#[axum::debug_handler]
pub async fn readyz(ctx: RequestContext, State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let result = state.check_storage().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let status = ReadinessStatus {
        healthy: result.is_ok(),
        latency_ms,
        chat_backend: state.responder.name(),
        error: None,
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(status)),
        Err(e) => {
            tracing::warn!(request_id = %ctx.request_id, error = %e, "Readiness check failed");
            let error = if ctx.is_admin() {
                e.to_string()
            } else {
                "storage unavailable".to_string()
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessStatus {
                    error: Some(error),
                    ..status
                }),
            )
        }
    }
}
