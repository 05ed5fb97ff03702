// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inbound message pipeline.
//!
//! For each message: gate, load prior conversation state (TTL-checked),
//! take the confirmation fast path when possible, otherwise classify and
//! dispatch on the intent. The outermost boundary catches everything so a
//! failing message never takes the process down.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use comanda_core::{
    CatalogStore, ClassifyContext, ComandaError, InboundMessage, Intent, IntentClassifier,
    MessageSink, OrderStore, PendingOrder, TenantStore,
};

use crate::conversation::{ConversationState, ConversationStatus, ConversationStore};
use crate::{confirm, finalize, pricing, summary};

/// Routes every inbound message through the ordering state machine.
///
/// Owns all process-wide mutable state (conversation map, AI-outage notice
/// set); collaborators arrive injected so tests run without a process
/// restart between them.
pub struct MessageRouter {
    tenants: Arc<dyn TenantStore>,
    catalogs: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    classifier: Arc<dyn IntentClassifier>,
    sink: Arc<dyn MessageSink>,
    conversations: ConversationStore,
    /// Senders already told the AI is unavailable. Never reset before
    /// process restart.
    ai_notified: Mutex<HashSet<(String, String)>>,
}

impl MessageRouter {
    pub fn new(
        tenants: Arc<dyn TenantStore>,
        catalogs: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        classifier: Arc<dyn IntentClassifier>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            tenants,
            catalogs,
            orders,
            classifier,
            sink,
            conversations: ConversationStore::new(),
            ai_notified: Mutex::new(HashSet::new()),
        }
    }

    /// The conversation state store, shared with tests.
    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Handles one inbound message. Never returns an error: the outermost
    /// boundary logs failures and answers with one generic apology.
    pub async fn handle_message(&self, msg: &InboundMessage) {
        if let Err(e) = self.route(msg).await {
            error!(
                tenant_id = %msg.tenant_id,
                sender = %msg.sender,
                error = %e,
                "message pipeline failed"
            );
            if let Err(send_err) = self
                .sink
                .send_text(&msg.tenant_id, &msg.sender, summary::GENERIC_ERROR)
                .await
            {
                warn!(
                    tenant_id = %msg.tenant_id,
                    error = %send_err,
                    "could not deliver the error apology"
                );
            }
        }
    }

    async fn route(&self, msg: &InboundMessage) -> Result<(), ComandaError> {
        // Gate: own messages and non-text payloads are dropped silently.
        if msg.from_me {
            return Ok(());
        }
        let Some(text) = msg.body.as_text() else {
            debug!(tenant_id = %msg.tenant_id, "dropping non-text message");
            return Ok(());
        };

        // Gate: unknown or inactive tenants never get a reply.
        let Some(config) = self.tenants.get_tenant_config(&msg.tenant_id).await? else {
            debug!(tenant_id = %msg.tenant_id, "dropping message for unknown tenant");
            return Ok(());
        };
        if !config.is_active {
            debug!(tenant_id = %msg.tenant_id, "dropping message for inactive tenant");
            return Ok(());
        }

        let now = Utc::now();
        let prior = self
            .conversations
            .get_fresh(&msg.tenant_id, &msg.sender, now);

        // Confirmation fast path: a trivial "sim" never reaches the model.
        let mut prior_question = None;
        if let Some(state) = prior {
            match state.status {
                ConversationStatus::AwaitingConfirmation => {
                    if confirm::is_affirmative(text) {
                        if let Some(pending) = state.pending_order {
                            self.finalize(&msg.tenant_id, &msg.sender, pending).await?;
                        }
                        self.conversations.delete(&msg.tenant_id, &msg.sender);
                        return Ok(());
                    }
                    // Not an affirmation: classify as a modification. The
                    // stored state stays until a new order intent replaces it.
                }
                ConversationStatus::AwaitingClarification => {
                    // Hand the model the question it asked; the stored state
                    // is consumed regardless of what comes back.
                    prior_question = state.last_bot_message.clone();
                    self.conversations.delete(&msg.tenant_id, &msg.sender);
                }
            }
        }

        let catalog = self.catalogs.get_catalog(&msg.tenant_id).await?;
        let last_order = self
            .orders
            .get_last_order(&msg.tenant_id, &msg.sender)
            .await?;

        let ctx = ClassifyContext {
            message: text.to_string(),
            catalog: catalog.clone(),
            menu_url: config.menu_url.clone(),
            greeting: config.greeting.clone(),
            last_order,
            prior_question,
            business: config.business.clone(),
        };

        let Some(intent) = self.classifier.classify(&ctx).await else {
            self.notify_ai_outage(&msg.tenant_id, &msg.sender).await;
            return Ok(());
        };

        match intent {
            Intent::Order(mut pending) => {
                pricing::enrich_order(&mut pending, &catalog);
                let confirmation = summary::confirmation_summary(&pending);
                self.conversations.set(
                    &msg.tenant_id,
                    &msg.sender,
                    ConversationState::awaiting_confirmation(pending, now),
                );
                self.sink
                    .send_text(&msg.tenant_id, &msg.sender, &confirmation)
                    .await?;
                debug!(tenant_id = %msg.tenant_id, "order summarized, awaiting confirmation");
            }
            Intent::Clarification(question) => {
                self.conversations.set(
                    &msg.tenant_id,
                    &msg.sender,
                    ConversationState::awaiting_clarification(question.clone(), now),
                );
                self.sink
                    .send_text(&msg.tenant_id, &msg.sender, &question)
                    .await?;
                debug!(tenant_id = %msg.tenant_id, "clarification sent");
            }
            Intent::Reply(reply) => {
                self.sink
                    .send_text(&msg.tenant_id, &msg.sender, &reply)
                    .await?;
            }
        }

        Ok(())
    }

    /// Persists a confirmed draft and sends the receipt.
    ///
    /// When the write fails the customer gets an apology and no tracking
    /// code is ever promised.
    async fn finalize(
        &self,
        tenant_id: &str,
        sender: &str,
        pending: PendingOrder,
    ) -> Result<(), ComandaError> {
        let code = finalize::generate_tracking_code();
        let order = finalize::build_finalized_order(&code, pending, sender, Utc::now());

        match self.orders.create_order(tenant_id, &order).await {
            Ok(()) => {
                info!(
                    tenant_id,
                    tracking_code = %order.tracking_code,
                    total = order.total,
                    "order finalized"
                );
                self.sink
                    .send_text(tenant_id, sender, &summary::receipt(&order))
                    .await?;
            }
            Err(e) => {
                warn!(tenant_id, error = %e, "order persistence failed");
                self.sink
                    .send_text(tenant_id, sender, summary::PERSIST_FAILED)
                    .await?;
            }
        }
        Ok(())
    }

    /// Tells a sender the AI is down, at most once per process lifetime.
    async fn notify_ai_outage(&self, tenant_id: &str, sender: &str) {
        let first_failure = self
            .ai_notified
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert((tenant_id.to_string(), sender.to_string()));

        if !first_failure {
            debug!(tenant_id, sender, "classifier still down, notice suppressed");
            return;
        }

        warn!(tenant_id, sender, "classifier unavailable, notifying sender once");
        if let Err(e) = self
            .sink
            .send_text(tenant_id, sender, summary::AI_UNAVAILABLE)
            .await
        {
            warn!(tenant_id, error = %e, "could not deliver AI-unavailable notice");
        }
    }
}
