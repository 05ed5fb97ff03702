// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracking code generation and finalized-order construction.

use chrono::{DateTime, Utc};
use rand::Rng;

use comanda_core::{FinalizedOrder, PendingOrder, ORDER_SOURCE_CHAT, ORDER_STATUS_NEW};

/// Alphabet for tracking codes: uppercase letters and digits.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a tracking code.
const CODE_LEN: usize = 8;

/// Generates an 8-character uppercase alphanumeric tracking code.
///
/// Uniqueness is not verified: at 36^8 possible codes a collision is
/// astronomically unlikely, and the order insert rejects duplicates rather
/// than overwriting.
pub fn generate_tracking_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Builds the persisted order record from a confirmed draft.
pub fn build_finalized_order(
    tracking_code: &str,
    pending: PendingOrder,
    sender: &str,
    now: DateTime<Utc>,
) -> FinalizedOrder {
    let timestamp = now.to_rfc3339();
    FinalizedOrder {
        tracking_code: tracking_code.to_string(),
        customer_name: pending.customer_name,
        phone: phone_from_sender(sender),
        delivery: pending.address.is_some(),
        address: pending.address,
        items: pending.items,
        total: pending.total,
        status: ORDER_STATUS_NEW.to_string(),
        payment_method: pending.payment_method,
        source: ORDER_SOURCE_CHAT.to_string(),
        sender: sender.to_string(),
        created_at: timestamp.clone(),
        updated_at: timestamp,
    }
}

/// Extracts the phone number from a chat address like `5511999990000@c.us`.
fn phone_from_sender(sender: &str) -> String {
    sender
        .split('@')
        .next()
        .unwrap_or(sender)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}
