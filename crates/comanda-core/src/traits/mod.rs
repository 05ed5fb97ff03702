// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits that decouple the router and session manager from
//! concrete transports, stores, and the AI classifier.

pub mod classifier;
pub mod sink;
pub mod store;
pub mod transport;

pub use classifier::{ClassifyContext, IntentClassifier};
pub use sink::MessageSink;
pub use store::{CatalogStore, OrderStore, TenantStore};
pub use transport::{ChatTransport, TransportFactory};
