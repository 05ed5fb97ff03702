// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle states.

use serde::Serialize;
use strum::{Display, EnumString};

/// States in the per-tenant session FSM.
///
/// `disconnected -> initializing -> { qr_pending -> authenticated ->
/// connected }` or `initializing -> auth_failed`; any state returns to
/// `disconnected` on teardown or a transport-level disconnect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session exists. The default answer for unknown tenants.
    Disconnected,
    /// Connection created; handshake in flight.
    Initializing,
    /// A scannable auth payload is waiting for the operator.
    QrPending,
    /// The code was scanned; final handshake completing.
    Authenticated,
    /// Fully connected. The only state in which messages are routed.
    Connected,
    /// Authentication failed; the session will not recover on its own.
    AuthFailed,
}

/// Snapshot returned by the control surface for one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub is_connected: bool,
    pub has_qr: bool,
}

impl SessionStatus {
    /// Status reported when no session exists for the tenant.
    pub fn disconnected() -> Self {
        Self {
            state: SessionState::Disconnected,
            is_connected: false,
            has_qr: false,
        }
    }
}
