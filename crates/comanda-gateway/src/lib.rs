// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP control surface for the Comanda order bot.
//!
//! Exposes one REST operation per session-lifecycle action, all scoped to a
//! tenant: start, status, auth payload, disconnect.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, GatewayState, ServerConfig};
