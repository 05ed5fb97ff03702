// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire protocol spoken with the WhatsApp Web bridge.
//!
//! The bridge is a sidecar process that owns the actual WhatsApp Web
//! session; we exchange JSON frames with it over one websocket per tenant.

use serde::{Deserialize, Serialize};

use comanda_core::{InboundMessage, MessageBody, TransportEvent};

/// Message kind string the bridge uses for plain text chats.
pub const KIND_CHAT: &str = "chat";

/// An event frame received from the bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// A scannable authentication payload was issued.
    Qr { data: String },
    /// The QR code was accepted.
    Authenticated,
    /// The session is fully connected; messages will flow.
    Ready,
    /// An inbound chat message.
    Message {
        id: String,
        from: String,
        #[serde(default)]
        body: String,
        kind: String,
        #[serde(default)]
        from_me: bool,
        #[serde(default)]
        timestamp: String,
    },
    /// Authentication failed; the session cannot recover.
    AuthFailure {
        #[serde(default)]
        reason: String,
    },
    /// The bridge lost or closed the session.
    Disconnected {
        #[serde(default)]
        reason: String,
    },
}

/// A command frame sent to the bridge.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BridgeCommand {
    /// Send a plain text message to a chat peer.
    Send { to: String, body: String },
    /// Log the session out and release the bridge slot.
    Logout,
}

/// Translates a bridge event into the channel-agnostic [`TransportEvent`].
pub fn to_transport_event(tenant_id: &str, event: BridgeEvent) -> TransportEvent {
    match event {
        BridgeEvent::Qr { data } => TransportEvent::Qr(data),
        BridgeEvent::Authenticated => TransportEvent::Authenticated,
        BridgeEvent::Ready => TransportEvent::Ready,
        BridgeEvent::Message {
            from,
            body,
            kind,
            from_me,
            timestamp,
            ..
        } => {
            let body = if kind == KIND_CHAT {
                MessageBody::Text(body)
            } else {
                MessageBody::Unsupported(kind)
            };
            TransportEvent::Message(InboundMessage {
                tenant_id: tenant_id.to_string(),
                sender: from,
                body,
                from_me,
                timestamp,
            })
        }
        BridgeEvent::AuthFailure { reason } => TransportEvent::AuthFailed(reason),
        BridgeEvent::Disconnected { reason } => TransportEvent::Disconnected(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_event_deserializes() {
        let json = r#"{"event": "qr", "data": "2@abc123"}"#;
        let event: BridgeEvent = serde_json::from_str(json).unwrap();
        match to_transport_event("pizzaria-1", event) {
            TransportEvent::Qr(data) => assert_eq!(data, "2@abc123"),
            other => panic!("expected Qr, got {other:?}"),
        }
    }

    #[test]
    fn chat_message_maps_to_text_body() {
        let json = r#"{
            "event": "message",
            "id": "msg-1",
            "from": "5511999990000@c.us",
            "body": "quero uma pizza",
            "kind": "chat",
            "from_me": false,
            "timestamp": "2026-01-01T12:00:00Z"
        }"#;
        let event: BridgeEvent = serde_json::from_str(json).unwrap();
        match to_transport_event("pizzaria-1", event) {
            TransportEvent::Message(msg) => {
                assert_eq!(msg.tenant_id, "pizzaria-1");
                assert_eq!(msg.sender, "5511999990000@c.us");
                assert_eq!(msg.body.as_text(), Some("quero uma pizza"));
                assert!(!msg.from_me);
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn media_message_maps_to_unsupported_body() {
        let json = r#"{
            "event": "message",
            "id": "msg-2",
            "from": "5511999990000@c.us",
            "kind": "image",
            "from_me": false
        }"#;
        let event: BridgeEvent = serde_json::from_str(json).unwrap();
        match to_transport_event("pizzaria-1", event) {
            TransportEvent::Message(msg) => {
                assert_eq!(msg.body, MessageBody::Unsupported("image".into()));
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn own_message_preserves_from_me_flag() {
        let json = r#"{
            "event": "message",
            "id": "msg-3",
            "from": "5511999990000@c.us",
            "body": "resposta do bot",
            "kind": "chat",
            "from_me": true
        }"#;
        let event: BridgeEvent = serde_json::from_str(json).unwrap();
        match to_transport_event("pizzaria-1", event) {
            TransportEvent::Message(msg) => assert!(msg.from_me),
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn auth_failure_and_disconnect_carry_reasons() {
        let fail: BridgeEvent =
            serde_json::from_str(r#"{"event": "auth_failure", "reason": "expired"}"#).unwrap();
        match to_transport_event("t", fail) {
            TransportEvent::AuthFailed(reason) => assert_eq!(reason, "expired"),
            other => panic!("expected AuthFailed, got {other:?}"),
        }

        let gone: BridgeEvent =
            serde_json::from_str(r#"{"event": "disconnected"}"#).unwrap();
        match to_transport_event("t", gone) {
            TransportEvent::Disconnected(reason) => assert_eq!(reason, ""),
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn send_command_serializes_with_action_tag() {
        let cmd = BridgeCommand::Send {
            to: "5511999990000@c.us".into(),
            body: "Pedido confirmado!".into(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["action"], "send");
        assert_eq!(json["to"], "5511999990000@c.us");
        assert_eq!(json["body"], "Pedido confirmado!");
    }

    #[test]
    fn logout_command_serializes() {
        let json = serde_json::to_value(BridgeCommand::Logout).unwrap();
        assert_eq!(json["action"], "logout");
    }
}
