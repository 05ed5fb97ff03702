// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp channel for the Comanda order bot.
//!
//! Talks to a WhatsApp Web bridge sidecar over one websocket per tenant,
//! translating its JSON frames into the channel-agnostic transport events
//! the session manager consumes.

pub mod transport;
pub mod wire;

use std::sync::Arc;

use comanda_core::{ChatTransport, TransportFactory};

pub use transport::BridgeTransport;

/// Factory that produces one [`BridgeTransport`] per tenant.
pub struct BridgeTransportFactory {
    base_url: String,
}

impl BridgeTransportFactory {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl TransportFactory for BridgeTransportFactory {
    fn create(&self, tenant_id: &str) -> Arc<dyn ChatTransport> {
        Arc::new(BridgeTransport::new(&self.base_url, tenant_id))
    }
}
