// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Comanda workspace.

use serde::{Deserialize, Serialize};

/// Business identity shown to customers and embedded in classifier prompts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    /// Display name of the restaurant.
    #[serde(default)]
    pub name: String,

    /// Opening hours, free text (e.g. "18h às 23h, ter-dom").
    #[serde(default)]
    pub hours: Option<String>,

    /// Street address, free text.
    #[serde(default)]
    pub address: Option<String>,

    /// Contact phone, free text.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Per-tenant settings stored externally and re-read on every message,
/// so they can change at runtime without a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Whether the bot answers for this tenant at all. Inactive tenants
    /// are silently ignored.
    #[serde(default)]
    pub is_active: bool,

    /// Preferred greeting, handed to the classifier for first-contact
    /// replies.
    #[serde(default)]
    pub greeting: Option<String>,

    /// Public link to the menu, handed to the classifier.
    #[serde(default)]
    pub menu_url: Option<String>,

    /// Business identity block.
    #[serde(default)]
    pub business: BusinessInfo,
}

/// One product in a tenant's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: f64,
}

/// Content of an inbound chat message.
///
/// Only plain text is routed; everything else is dropped at the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// Plain text chat message.
    Text(String),
    /// Any non-text payload, tagged with the transport's kind string
    /// (image, audio, sticker, location, ...).
    Unsupported(String),
}

impl MessageBody {
    /// Returns the text content, or `None` for non-text messages.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageBody::Text(t) => Some(t),
            MessageBody::Unsupported(_) => None,
        }
    }
}

/// An inbound message delivered by a chat transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Tenant whose connection delivered the message.
    pub tenant_id: String,
    /// The customer's address on the chat transport (JID).
    pub sender: String,
    /// Message content.
    pub body: MessageBody,
    /// True when the message was sent by the bot's own account.
    pub from_me: bool,
    /// RFC 3339 delivery timestamp.
    pub timestamp: String,
}

/// One line of a draft or finalized order.
///
/// `unit_price` and `total` are enriched locally from the catalog; values
/// supplied by the classifier are never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total: f64,
}

fn default_quantity() -> u32 {
    1
}

/// A draft order extracted by the classifier, awaiting customer confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingOrder {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Computed locally as Σ(unit_price × quantity). Never negative.
    #[serde(default)]
    pub total: f64,
}

/// Lifecycle status of a finalized order. Only `New` is assigned by this
/// core; later transitions happen in the dashboard.
pub const ORDER_STATUS_NEW: &str = "new";

/// Source tag recorded on orders created from the chat channel.
pub const ORDER_SOURCE_CHAT: &str = "chat";

/// A persisted order, keyed by tracking code within its tenant.
///
/// Identity is immutable once created; only `status` transitions
/// afterwards, and that happens outside this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedOrder {
    /// 8-character uppercase alphanumeric public identifier.
    pub tracking_code: String,
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    pub source: String,
    /// The customer's chat transport address.
    pub sender: String,
    /// True for delivery, false for dine-in/pickup.
    pub delivery: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// The classifier's structured interpretation of one inbound message.
///
/// Anything the model produces that does not validate into one of these
/// three shapes is rejected by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A draft order was extracted; ask the customer to confirm it.
    Order(PendingOrder),
    /// A plain conversational answer to send verbatim.
    Reply(String),
    /// A question the bot must ask before the order can proceed.
    Clarification(String),
}

/// Formats a price the way it is shown to customers (e.g. `R$ 30.00`).
pub fn format_brl(value: f64) -> String {
    format!("R$ {value:.2}")
}

/// Lifecycle and message events emitted by a chat transport connection.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A scannable authentication payload was issued.
    Qr(String),
    /// The scannable code was accepted; handshake still completing.
    Authenticated,
    /// The connection is fully established and messages will flow.
    Ready,
    /// An inbound chat message.
    Message(InboundMessage),
    /// Authentication failed; the session cannot recover.
    AuthFailed(String),
    /// The transport dropped, voluntarily or not.
    Disconnected(String),
}
