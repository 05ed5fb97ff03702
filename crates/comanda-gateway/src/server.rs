// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control-surface HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use comanda_core::ComandaError;
use comanda_session::SessionManager;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The session manager every endpoint drives.
    pub sessions: Arc<SessionManager>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self {
            sessions,
            start_time: Instant::now(),
        }
    }
}

/// Server bind configuration (mirrors ServerConfig from comanda-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the full route tree.
///
/// One route per control operation, all tenant-scoped, plus the public
/// health probe.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/start/{tenant}", post(handlers::post_start))
        .route("/status/{tenant}", get(handlers::get_status))
        .route("/auth/{tenant}", get(handlers::get_auth))
        .route("/disconnect/{tenant}", post(handlers::post_disconnect))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the control-surface server and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), ComandaError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ComandaError::Channel {
            message: format!("failed to bind control surface to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("control surface listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ComandaError::Channel {
            message: format!("control surface server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use comanda_core::{ChatTransport, TransportEvent, TransportFactory};

    use super::*;

    /// Transport that emits a scripted prefix of events and stays open.
    struct ScriptedTransport {
        script: Mutex<Vec<TransportEvent>>,
        hold: Mutex<Option<mpsc::Sender<TransportEvent>>>,
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ComandaError> {
            let (tx, rx) = mpsc::channel(16);
            for event in self.script.lock().unwrap().drain(..) {
                tx.try_send(event).expect("script fits channel");
            }
            *self.hold.lock().unwrap() = Some(tx);
            Ok(rx)
        }

        async fn send_text(&self, _to: &str, _body: &str) -> Result<(), ComandaError> {
            Ok(())
        }

        async fn disconnect(&self) -> Result<(), ComandaError> {
            self.hold.lock().unwrap().take();
            Ok(())
        }
    }

    struct ScriptedFactory {
        script: Mutex<Vec<TransportEvent>>,
    }

    impl TransportFactory for ScriptedFactory {
        fn create(&self, _tenant_id: &str) -> Arc<dyn ChatTransport> {
            Arc::new(ScriptedTransport {
                script: Mutex::new(self.script.lock().unwrap().clone()),
                hold: Mutex::new(None),
            })
        }
    }

    fn test_state(script: Vec<TransportEvent>) -> GatewayState {
        let factory = Arc::new(ScriptedFactory {
            script: Mutex::new(script),
        });
        let (tx, _rx) = mpsc::channel(16);
        GatewayState::new(Arc::new(SessionManager::new(factory, tx)))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn status_defaults_to_disconnected() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(
                Request::get("/status/pizzaria-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "disconnected");
        assert_eq!(json["is_connected"], false);
        assert_eq!(json["has_qr"], false);
    }

    #[tokio::test]
    async fn auth_is_null_without_session() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(Request::get("/auth/pizzaria-1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert!(json["qr"].is_null());
        assert_eq!(json["status"], "disconnected");
    }

    #[tokio::test]
    async fn start_initializes_and_auth_surfaces_the_qr() {
        let state = test_state(vec![TransportEvent::Qr("2@abc".into())]);
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::post("/start/pizzaria-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The QR event is applied by the pump shortly after start returns.
        let mut qr = serde_json::Value::Null;
        for _ in 0..100 {
            let response = app
                .clone()
                .oneshot(Request::get("/auth/pizzaria-1").body(Body::empty()).unwrap())
                .await
                .unwrap();
            let json = body_json(response).await;
            if !json["qr"].is_null() {
                qr = json["qr"].clone();
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(qr, "2@abc");
    }

    #[tokio::test]
    async fn disconnect_always_succeeds() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(
                Request::post("/disconnect/tenant-desconhecido")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "disconnected");
    }
}
