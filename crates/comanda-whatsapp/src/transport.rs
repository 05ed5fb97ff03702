// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Websocket transport to the WhatsApp Web bridge.
//!
//! `connect` dials `{bridge}/session/{tenant}` and spawns one reader and
//! one writer task. The reader translates bridge frames into
//! [`TransportEvent`]s; the writer drains a command channel. Dropping the
//! transport (or calling `disconnect`) closes the command channel, which
//! ends the writer.

use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, warn};

use comanda_core::{ChatTransport, ComandaError, TransportEvent};

use crate::wire::{self, BridgeCommand, BridgeEvent};

/// [`ChatTransport`] implementation backed by a bridge websocket.
pub struct BridgeTransport {
    base_url: String,
    tenant_id: String,
    cmd_tx: Mutex<Option<mpsc::Sender<BridgeCommand>>>,
}

impl BridgeTransport {
    /// Creates a transport for one tenant. No I/O happens until `connect`.
    pub fn new(base_url: &str, tenant_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.to_string(),
            cmd_tx: Mutex::new(None),
        }
    }

    fn session_url(&self) -> String {
        format!("{}/session/{}", self.base_url, self.tenant_id)
    }

    fn command_sender(&self) -> Result<mpsc::Sender<BridgeCommand>, ComandaError> {
        self.cmd_tx
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or_else(|| ComandaError::NotConnected(self.tenant_id.clone()))
    }
}

#[async_trait]
impl ChatTransport for BridgeTransport {
    async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ComandaError> {
        let url = self.session_url();
        let (ws_stream, _) = connect_async(&url).await.map_err(|e| ComandaError::Channel {
            message: format!("failed to connect to bridge at {url}: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(tenant_id = %self.tenant_id, url = %url, "bridge websocket connected");

        let (mut write, mut read) = ws_stream.split();
        let (event_tx, event_rx) = mpsc::channel::<TransportEvent>(64);
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<BridgeCommand>(16);

        // Writer: drain commands until the channel closes or a logout.
        let writer_tenant = self.tenant_id.clone();
        tokio::spawn(async move {
            while let Some(cmd) = cmd_rx.recv().await {
                let logout = matches!(cmd, BridgeCommand::Logout);
                let frame = match serde_json::to_string(&cmd) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(tenant_id = %writer_tenant, error = %e, "failed to encode bridge command");
                        continue;
                    }
                };
                if write.send(WsMessage::Text(frame.into())).await.is_err() {
                    break;
                }
                if logout {
                    let _ = write.send(WsMessage::Close(None)).await;
                    break;
                }
            }
        });

        // Reader: translate bridge frames into transport events until the
        // socket ends. Exactly one Disconnected event terminates the stream.
        let reader_tenant = self.tenant_id.clone();
        tokio::spawn(async move {
            loop {
                match read.next().await {
                    Some(Ok(WsMessage::Text(text))) => {
                        let event: BridgeEvent = match serde_json::from_str(text.as_str()) {
                            Ok(event) => event,
                            Err(e) => {
                                warn!(
                                    tenant_id = %reader_tenant,
                                    error = %e,
                                    "ignoring malformed bridge frame"
                                );
                                continue;
                            }
                        };
                        let done = matches!(event, BridgeEvent::Disconnected { .. });
                        let transport_event = wire::to_transport_event(&reader_tenant, event);
                        if event_tx.send(transport_event).await.is_err() || done {
                            break;
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        let _ = event_tx
                            .send(TransportEvent::Disconnected("bridge closed".to_string()))
                            .await;
                        break;
                    }
                    Some(Ok(_)) => {} // ping/pong/binary frames are not part of the protocol
                    Some(Err(e)) => {
                        let _ = event_tx
                            .send(TransportEvent::Disconnected(e.to_string()))
                            .await;
                        break;
                    }
                }
            }
        });

        if let Ok(mut guard) = self.cmd_tx.lock() {
            *guard = Some(cmd_tx);
        }

        Ok(event_rx)
    }

    async fn send_text(&self, to: &str, body: &str) -> Result<(), ComandaError> {
        let sender = self.command_sender()?;
        sender
            .send(BridgeCommand::Send {
                to: to.to_string(),
                body: body.to_string(),
            })
            .await
            .map_err(|_| ComandaError::Channel {
                message: format!("bridge connection for {} is gone", self.tenant_id),
                source: None,
            })
    }

    async fn disconnect(&self) -> Result<(), ComandaError> {
        let sender = {
            let mut guard = self
                .cmd_tx
                .lock()
                .map_err(|_| ComandaError::Internal("transport lock poisoned".to_string()))?;
            guard.take()
        };
        if let Some(sender) = sender {
            // Best effort: the bridge may already be gone.
            let _ = sender.send(BridgeCommand::Logout).await;
        }
        Ok(())
    }
}
