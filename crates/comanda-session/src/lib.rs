// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle management for the Comanda order bot.
//!
//! One [`SessionManager`] multiplexes every tenant's chat connection,
//! tracks the per-session FSM, and implements the outbound
//! [`MessageSink`](comanda_core::MessageSink) the router sends through.

pub mod manager;
pub mod state;

pub use manager::SessionManager;
pub use state::{SessionState, SessionStatus};
