// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state, keyed by (tenant, sender), with read-time expiry.
//!
//! There is no background sweeper: entries are always checked against the
//! TTL on read, and the live set is bounded by concurrently-chatting
//! customers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

use comanda_core::PendingOrder;

/// How long a pending conversational state stays usable.
pub const STATE_TTL_SECS: i64 = 5 * 60;

/// What the bot is waiting for from this customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStatus {
    /// A draft order was summarized; waiting for "sim".
    AwaitingConfirmation,
    /// A clarification question was asked; waiting for the answer.
    AwaitingClarification,
}

/// Pending conversational state for one (tenant, sender) pair.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub status: ConversationStatus,
    pub pending_order: Option<PendingOrder>,
    pub last_bot_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConversationState {
    /// State stored after sending an order confirmation summary.
    pub fn awaiting_confirmation(order: PendingOrder, now: DateTime<Utc>) -> Self {
        Self {
            status: ConversationStatus::AwaitingConfirmation,
            pending_order: Some(order),
            last_bot_message: None,
            created_at: now,
        }
    }

    /// State stored after asking a clarification question.
    pub fn awaiting_clarification(question: String, now: DateTime<Utc>) -> Self {
        Self {
            status: ConversationStatus::AwaitingClarification,
            pending_order: None,
            last_bot_message: Some(question),
            created_at: now,
        }
    }

    /// The one expiry policy shared by the router and its tests: an entry
    /// older than [`STATE_TTL_SECS`] must be treated as absent.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > TimeDelta::seconds(STATE_TTL_SECS)
    }
}

/// In-memory conversation state store.
pub struct ConversationStore {
    entries: Mutex<HashMap<(String, String), ConversationState>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<(String, String), ConversationState>> {
        // The map stays usable even if a holder panicked mid-update.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the live state for (tenant, sender). An expired entry is
    /// deleted and reported as absent.
    pub fn get_fresh(
        &self,
        tenant_id: &str,
        sender: &str,
        now: DateTime<Utc>,
    ) -> Option<ConversationState> {
        let key = (tenant_id.to_string(), sender.to_string());
        let mut entries = self.entries();
        match entries.get(&key) {
            Some(state) if state.is_expired(now) => {
                entries.remove(&key);
                None
            }
            Some(state) => Some(state.clone()),
            None => None,
        }
    }

    /// Stores (or replaces) the state for (tenant, sender).
    pub fn set(&self, tenant_id: &str, sender: &str, state: ConversationState) {
        self.entries()
            .insert((tenant_id.to_string(), sender.to_string()), state);
    }

    /// Deletes the state for (tenant, sender), if any.
    pub fn delete(&self, tenant_id: &str, sender: &str) {
        self.entries()
            .remove(&(tenant_id.to_string(), sender.to_string()));
    }

    /// Number of live entries (expired ones included until read).
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
