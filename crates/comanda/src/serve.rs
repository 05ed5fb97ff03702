// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring for the `serve` command.
//!
//! Builds the dependency graph (storage, classifier, session manager,
//! router), spawns the inbound routing loop, and runs the control surface
//! until the process exits.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use comanda_classifier::ClaudeClassifier;
use comanda_config::ComandaConfig;
use comanda_core::{
    CatalogStore, ComandaError, InboundMessage, IntentClassifier, MessageSink, OrderStore,
    TenantStore,
};
use comanda_gateway::{GatewayState, ServerConfig};
use comanda_router::MessageRouter;
use comanda_session::SessionManager;
use comanda_storage::SqliteStore;
use comanda_whatsapp::BridgeTransportFactory;

/// Capacity of the shared inbound message channel. Messages queue here
/// between the session pumps and the routing loop.
const INBOUND_CHANNEL_CAPACITY: usize = 512;

/// Runs the server until the control surface exits.
pub async fn run(config: ComandaConfig) -> Result<(), ComandaError> {
    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    info!(path = %config.storage.database_path, "storage ready");

    let classifier: Arc<dyn IntentClassifier> =
        Arc::new(ClaudeClassifier::new(&config.anthropic)?);

    let factory = Arc::new(BridgeTransportFactory::new(&config.bridge.url));
    let (inbound_tx, mut inbound_rx) = mpsc::channel::<InboundMessage>(INBOUND_CHANNEL_CAPACITY);
    let sessions = Arc::new(SessionManager::new(factory, inbound_tx));

    let router = Arc::new(MessageRouter::new(
        Arc::clone(&store) as Arc<dyn TenantStore>,
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        Arc::clone(&store) as Arc<dyn OrderStore>,
        classifier,
        Arc::clone(&sessions) as Arc<dyn MessageSink>,
    ));

    // Routing loop: one task per message, so a slow classifier call for one
    // sender never blocks the next message.
    tokio::spawn(async move {
        while let Some(msg) = inbound_rx.recv().await {
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                router.handle_message(&msg).await;
            });
        }
    });

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    comanda_gateway::start_server(&server_config, GatewayState::new(sessions)).await
}
