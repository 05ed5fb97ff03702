// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI intent classifier for the Comanda order bot.
//!
//! Wraps one Anthropic Messages call per inbound message and validates the
//! model's JSON answer into the [`Intent`] sum type. Every failure mode —
//! transport, non-2xx, unparsable output — collapses to `None`; the router
//! treats that distinctly from a valid reply intent.

pub mod client;
pub mod parse;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use tracing::{debug, warn};

use comanda_config::model::AnthropicConfig;
use comanda_core::{ClassifyContext, ComandaError, Intent, IntentClassifier};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Claude-backed implementation of [`IntentClassifier`].
pub struct ClaudeClassifier {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
}

impl ClaudeClassifier {
    /// Builds the classifier from config.
    ///
    /// The API key comes from `anthropic.api_key` or, failing that, the
    /// `ANTHROPIC_API_KEY` environment variable.
    pub fn new(config: &AnthropicConfig) -> Result<Self, ComandaError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                ComandaError::Config(
                    "anthropic.api_key is not set and ANTHROPIC_API_KEY is not exported"
                        .to_string(),
                )
            })?;

        let client = AnthropicClient::new(&api_key, &config.api_version)?;
        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    #[cfg(test)]
    fn with_client(client: AnthropicClient, model: &str, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[async_trait]
impl IntentClassifier for ClaudeClassifier {
    async fn classify(&self, ctx: &ClassifyContext) -> Option<Intent> {
        let request = MessageRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt::build_user_message(ctx),
            }],
            system: Some(prompt::build_system_prompt(ctx)),
            max_tokens: self.max_tokens,
        };

        let response = match self.client.complete_message(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "classification call failed");
                return None;
            }
        };

        let text = response.text();
        match parse::parse_intent(&text) {
            Some(intent) => {
                debug!(intent = ?intent_tag(&intent), "message classified");
                Some(intent)
            }
            None => {
                warn!(output = %text, "model output did not validate into an intent");
                None
            }
        }
    }
}

fn intent_tag(intent: &Intent) -> &'static str {
    match intent {
        Intent::Order(_) => "order",
        Intent::Reply(_) => "reply",
        Intent::Clarification(_) => "clarification",
    }
}
