// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multiplexing session manager: one live chat connection per tenant.
//!
//! `start` spawns exactly one event-pump task per connection; the pump owns
//! all state transitions for that session and forwards inbound messages to
//! the shared routing channel only while the session is `Connected`.
//! Restarting a tenant tears the previous session down first, so at most
//! one live session exists per tenant at any time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use comanda_core::{
    ChatTransport, ComandaError, InboundMessage, MessageSink, TransportEvent, TransportFactory,
};

use crate::state::{SessionState, SessionStatus};

struct SessionEntry {
    state: SessionState,
    qr: Option<String>,
    transport: Arc<dyn ChatTransport>,
    /// Set right after the pump task is spawned; `None` only in the narrow
    /// window between insert and spawn.
    pump: Option<JoinHandle<()>>,
    /// Guards against a stale pump task mutating a replacement session.
    epoch: u64,
}

/// Owns the lifecycle of every tenant's chat connection.
pub struct SessionManager {
    factory: Arc<dyn TransportFactory>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    sessions: DashMap<String, SessionEntry>,
    next_epoch: AtomicU64,
}

impl SessionManager {
    /// Creates the manager. Inbound text messages from connected sessions
    /// are forwarded into `inbound_tx` for the router loop.
    pub fn new(
        factory: Arc<dyn TransportFactory>,
        inbound_tx: mpsc::Sender<InboundMessage>,
    ) -> Self {
        Self {
            factory,
            inbound_tx,
            sessions: DashMap::new(),
            next_epoch: AtomicU64::new(0),
        }
    }

    /// Starts (or restarts) the tenant's session.
    ///
    /// Any existing session is torn down first, so calling `start` twice
    /// leaves exactly one live session. Returns once the connection is
    /// created; the auth handshake proceeds asynchronously and is observed
    /// via [`status`](Self::status).
    pub async fn start(self: &Arc<Self>, tenant_id: &str) -> Result<SessionStatus, ComandaError> {
        // Idempotent restart: drop any previous session for this tenant.
        self.stop(tenant_id).await;

        let transport = self.factory.create(tenant_id);
        let mut events = transport.connect().await?;

        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);

        // The entry must exist before the pump runs, or early events (the
        // QR frame in particular) would find nothing to update.
        self.sessions.insert(
            tenant_id.to_string(),
            SessionEntry {
                state: SessionState::Initializing,
                qr: None,
                transport,
                pump: None,
                epoch,
            },
        );

        let manager = Arc::clone(self);
        let pump_tenant = tenant_id.to_string();
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if !manager.apply_event(&pump_tenant, epoch, event).await {
                    return;
                }
            }
            // Event stream ended without an explicit disconnect frame.
            manager.remove_if_epoch(&pump_tenant, epoch);
            debug!(tenant_id = %pump_tenant, "session event stream ended");
        });
        self.update_if_epoch(tenant_id, epoch, |entry| entry.pump = Some(pump));

        info!(tenant_id, "session initializing");
        Ok(self.status(tenant_id))
    }

    /// Current lifecycle snapshot, defaulting to disconnected for unknown
    /// tenants.
    pub fn status(&self, tenant_id: &str) -> SessionStatus {
        match self.sessions.get(tenant_id) {
            Some(entry) => SessionStatus {
                state: entry.state,
                is_connected: entry.state == SessionState::Connected,
                has_qr: entry.state == SessionState::QrPending && entry.qr.is_some(),
            },
            None => SessionStatus::disconnected(),
        }
    }

    /// The scannable auth payload, only while the session is waiting for it.
    pub fn qr(&self, tenant_id: &str) -> Option<String> {
        self.sessions.get(tenant_id).and_then(|entry| {
            if entry.state == SessionState::QrPending {
                entry.qr.clone()
            } else {
                None
            }
        })
    }

    /// Tears down the tenant's session. No-op for unknown tenants.
    ///
    /// The session record is removed eagerly, so `status` reports
    /// disconnected as soon as this returns.
    pub async fn stop(&self, tenant_id: &str) {
        let Some((_, entry)) = self.sessions.remove(tenant_id) else {
            return;
        };
        if let Err(e) = entry.transport.disconnect().await {
            warn!(tenant_id, error = %e, "transport disconnect failed during stop");
        }
        if let Some(pump) = entry.pump {
            pump.abort();
        }
        info!(tenant_id, "session stopped");
    }

    /// Applies one transport event to the tenant's session entry.
    ///
    /// Returns `false` when the pump should stop (session removed or
    /// replaced by a newer epoch).
    async fn apply_event(&self, tenant_id: &str, epoch: u64, event: TransportEvent) -> bool {
        match event {
            TransportEvent::Qr(data) => {
                self.update_if_epoch(tenant_id, epoch, |entry| {
                    entry.state = SessionState::QrPending;
                    entry.qr = Some(data);
                });
                debug!(tenant_id, "auth payload issued");
                true
            }
            TransportEvent::Authenticated => {
                self.update_if_epoch(tenant_id, epoch, |entry| {
                    entry.state = SessionState::Authenticated;
                    entry.qr = None;
                });
                debug!(tenant_id, "auth payload accepted");
                true
            }
            TransportEvent::Ready => {
                self.update_if_epoch(tenant_id, epoch, |entry| {
                    entry.state = SessionState::Connected;
                    entry.qr = None;
                });
                info!(tenant_id, "session connected");
                true
            }
            TransportEvent::Message(msg) => {
                // Only a connected session routes messages.
                let connected = self
                    .sessions
                    .get(tenant_id)
                    .map(|entry| entry.epoch == epoch && entry.state == SessionState::Connected)
                    .unwrap_or(false);
                if connected && self.inbound_tx.send(msg).await.is_err() {
                    warn!(tenant_id, "router loop gone, stopping session pump");
                    return false;
                }
                true
            }
            TransportEvent::AuthFailed(reason) => {
                warn!(tenant_id, reason = %reason, "session authentication failed");
                self.update_if_epoch(tenant_id, epoch, |entry| {
                    entry.state = SessionState::AuthFailed;
                    entry.qr = None;
                });
                true
            }
            TransportEvent::Disconnected(reason) => {
                info!(tenant_id, reason = %reason, "session disconnected");
                self.remove_if_epoch(tenant_id, epoch);
                false
            }
        }
    }

    fn update_if_epoch(
        &self,
        tenant_id: &str,
        epoch: u64,
        update: impl FnOnce(&mut SessionEntry),
    ) {
        if let Some(mut entry) = self.sessions.get_mut(tenant_id) {
            if entry.epoch == epoch {
                update(entry.value_mut());
            }
        }
    }

    fn remove_if_epoch(&self, tenant_id: &str, epoch: u64) {
        self.sessions
            .remove_if(tenant_id, |_, entry| entry.epoch == epoch);
    }
}

#[async_trait]
impl MessageSink for SessionManager {
    async fn send_text(
        &self,
        tenant_id: &str,
        to: &str,
        body: &str,
    ) -> Result<(), ComandaError> {
        let transport = match self.sessions.get(tenant_id) {
            Some(entry) if entry.state == SessionState::Connected => {
                Arc::clone(&entry.transport)
            }
            _ => return Err(ComandaError::NotConnected(tenant_id.to_string())),
        };
        transport.send_text(to, body).await
    }
}
