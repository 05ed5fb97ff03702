// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! One request per classification, no automatic retries: a failed call is
//! reported once and the conversation continues on the customer's next
//! message.

use std::time::Duration;

use comanda_core::ComandaError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic API client.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key for authentication
    /// * `api_version` - API version string (e.g., "2023-06-01")
    pub fn new(api_key: &str, api_version: &str) -> Result<Self, ComandaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                ComandaError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                ComandaError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ComandaError::Classifier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ComandaError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ComandaError::Classifier {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "classification response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| ComandaError::Classifier {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            let msg_response: MessageResponse =
                serde_json::from_str(&body).map_err(|e| ComandaError::Classifier {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                })?;
            return Ok(msg_response);
        }

        let body = response.text().await.unwrap_or_default();
        let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!(
                "Anthropic API error ({}): {}",
                api_err.error.type_, api_err.error.message
            )
        } else {
            format!("API returned {status}: {body}")
        };
        Err(ComandaError::Classifier {
            message: error_msg,
            source: None,
        })
    }
}
