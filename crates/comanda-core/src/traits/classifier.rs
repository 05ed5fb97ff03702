// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classifier capability.

use async_trait::async_trait;

use crate::types::{BusinessInfo, CatalogItem, FinalizedOrder, Intent};

/// Everything the classifier needs to interpret one inbound message.
#[derive(Debug, Clone, Default)]
pub struct ClassifyContext {
    /// The customer's message text.
    pub message: String,
    /// The tenant's product list, embedded into the prompt as a name list.
    pub catalog: Vec<CatalogItem>,
    /// Public menu link, if configured.
    pub menu_url: Option<String>,
    /// The tenant's preferred greeting, used by the model on first contact.
    pub greeting: Option<String>,
    /// The customer's last finalized order, for personalization.
    pub last_order: Option<FinalizedOrder>,
    /// The clarification question the bot previously asked, if the
    /// conversation is continuing one.
    pub prior_question: Option<String>,
    /// Tenant business identity.
    pub business: BusinessInfo,
}

/// One external AI call per inbound message.
///
/// Returns `None` — not an error — on transport failure or unparsable
/// model output. Callers must treat `None` distinctly from a structurally
/// valid [`Intent::Reply`].
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, ctx: &ClassifyContext) -> Option<Intent>;
}
