// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message capability.

use async_trait::async_trait;

use crate::error::ComandaError;

/// Sends outbound text through a tenant's active connection.
///
/// Implemented by the session manager; injected into the router so routing
/// logic never touches connection state directly.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Sends `body` to chat peer `to` over `tenant_id`'s live session.
    ///
    /// Fails with [`ComandaError::NotConnected`] when the tenant has no
    /// connected session.
    async fn send_text(&self, tenant_id: &str, to: &str, body: &str)
        -> Result<(), ComandaError>;
}
