// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the session control surface.
//!
//! Handles POST /start/{tenant}, GET /status/{tenant}, GET /auth/{tenant},
//! POST /disconnect/{tenant}, and the public GET /health probe.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use comanda_session::SessionStatus;

use crate::server::GatewayState;

/// Response body for status-bearing endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Lifecycle state name (disconnected, initializing, qr_pending, ...).
    pub status: String,
    /// True only while the session is fully connected.
    pub is_connected: bool,
    /// True while a scannable auth payload is waiting for the operator.
    pub has_qr: bool,
}

impl From<SessionStatus> for StatusResponse {
    fn from(status: SessionStatus) -> Self {
        Self {
            status: status.state.to_string(),
            is_connected: status.is_connected,
            has_qr: status.has_qr,
        }
    }
}

/// Response body for GET /auth/{tenant}.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The scannable payload, or null outside the qr_pending state.
    pub qr: Option<String>,
    /// Lifecycle state name.
    pub status: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /start/{tenant}
///
/// Begins session initialization for the tenant, tearing down any existing
/// session first. Returns the current status; the handshake continues
/// asynchronously.
pub async fn post_start(
    State(state): State<GatewayState>,
    Path(tenant): Path<String>,
) -> Response {
    match state.sessions.start(&tenant).await {
        Ok(status) => (StatusCode::OK, Json(StatusResponse::from(status))).into_response(),
        Err(e) => {
            warn!(tenant_id = %tenant, error = %e, "session start failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /status/{tenant}
///
/// Returns the tenant's lifecycle snapshot; disconnected when no session
/// exists.
pub async fn get_status(
    State(state): State<GatewayState>,
    Path(tenant): Path<String>,
) -> Json<StatusResponse> {
    Json(StatusResponse::from(state.sessions.status(&tenant)))
}

/// GET /auth/{tenant}
///
/// Returns the scannable auth payload while the session is waiting for it,
/// null otherwise.
pub async fn get_auth(
    State(state): State<GatewayState>,
    Path(tenant): Path<String>,
) -> Json<AuthResponse> {
    let status = state.sessions.status(&tenant);
    Json(AuthResponse {
        qr: state.sessions.qr(&tenant),
        status: status.state.to_string(),
    })
}

/// POST /disconnect/{tenant}
///
/// Tears the session down. Always succeeds; disconnecting an unknown tenant
/// is a no-op.
pub async fn post_disconnect(
    State(state): State<GatewayState>,
    Path(tenant): Path<String>,
) -> Json<StatusResponse> {
    state.sessions.stop(&tenant).await;
    Json(StatusResponse::from(state.sessions.status(&tenant)))
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
