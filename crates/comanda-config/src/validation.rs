// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and websocket URL schemes.

use crate::diagnostic::ConfigError;
use crate::model::ComandaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ComandaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let addr = config.server.host.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "server.host `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    // Validate bridge URL scheme
    let bridge_url = config.bridge.url.trim();
    if !bridge_url.starts_with("ws://") && !bridge_url.starts_with("wss://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "bridge.url must use a ws:// or wss:// scheme, got `{bridge_url}`"
            ),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate max_tokens is positive
    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.max_tokens must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ComandaConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ComandaConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn non_websocket_bridge_url_fails_validation() {
        let mut config = ComandaConfig::default();
        config.bridge.url = "http://127.0.0.1:8790".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("bridge.url"))));
    }

    #[test]
    fn zero_max_tokens_fails_validation() {
        let mut config = ComandaConfig::default();
        config.anthropic.max_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_tokens"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = ComandaConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 3000;
        config.bridge.url = "wss://bridge.internal:8790".to_string();
        config.storage.database_path = "/tmp/test.db".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
