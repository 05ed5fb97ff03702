// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport capability.
//!
//! The session manager depends only on this interface, never on transport
//! internals, so the concrete bridge can be swapped or mocked in tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::ComandaError;
use crate::types::TransportEvent;

/// A bidirectional chat connection for one tenant.
///
/// `connect` returns the event receiver for this connection: lifecycle
/// transitions (QR issued, authenticated, ready, disconnected) and inbound
/// messages all arrive as [`TransportEvent`]s. The receiver closing means
/// the connection is gone.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Establishes the connection and returns its event stream.
    ///
    /// Must not block past connection setup; the auth handshake proceeds
    /// asynchronously and is reported through the event stream.
    async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ComandaError>;

    /// Sends a plain text message to a chat peer.
    async fn send_text(&self, to: &str, body: &str) -> Result<(), ComandaError>;

    /// Tears down the connection. Idempotent.
    async fn disconnect(&self) -> Result<(), ComandaError>;
}

/// Builds a fresh transport for a tenant.
///
/// Injected into the session manager so tests can supply scripted
/// transports instead of a live bridge connection.
pub trait TransportFactory: Send + Sync {
    fn create(&self, tenant_id: &str) -> Arc<dyn ChatTransport>;
}
