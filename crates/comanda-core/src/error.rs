// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Comanda order bot.

use thiserror::Error;

/// The primary error type used across all Comanda traits and core operations.
#[derive(Debug, Error)]
pub enum ComandaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (bridge connection failure, send failure, protocol violations).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Intent classifier errors (API failure, malformed model output).
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No live connected session exists for the tenant.
    #[error("tenant not connected: {0}")]
    NotConnected(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
