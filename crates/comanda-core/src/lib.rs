// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Comanda order bot.
//!
//! This crate provides the error type, domain types, and capability traits
//! used throughout the workspace. The session manager, router, and gateway
//! depend on the traits defined here rather than on concrete transports,
//! stores, or the AI classifier.

pub mod error;
pub mod traits;
pub mod types;

pub use error::ComandaError;
pub use types::{
    format_brl, BusinessInfo, CatalogItem, FinalizedOrder, InboundMessage, Intent, MessageBody,
    OrderItem, PendingOrder, TenantConfig, TransportEvent,
};

pub use traits::{
    CatalogStore, ChatTransport, ClassifyContext, IntentClassifier, MessageSink, OrderStore,
    TenantStore, TransportFactory,
};
