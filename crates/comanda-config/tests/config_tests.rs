// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Comanda configuration system.

use comanda_config::diagnostic::{suggest_key, ConfigError};
use comanda_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_comanda_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 3000
log_level = "debug"

[anthropic]
api_key = "sk-ant-123"
model = "claude-haiku-4-5-20250901"
max_tokens = 512

[bridge]
url = "wss://bridge.internal:8790"

[storage]
database_path = "/tmp/test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.anthropic.max_tokens, 512);
    assert_eq!(config.bridge.url, "wss://bridge.internal:8790");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
}

/// Unknown field in [server] section produces an UnknownField error.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 9000
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field in [storage] section produces an UnknownField error.
#[test]
fn unknown_field_in_storage_produces_error() {
    let toml = r#"
[storage]
databse_path = "/tmp/x.db"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("databse_path"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "info");
    assert!(config.anthropic.api_key.is_none());
    assert_eq!(config.anthropic.model, "claude-haiku-4-5-20250901");
    assert_eq!(config.bridge.url, "ws://127.0.0.1:8790");
    assert_eq!(config.storage.database_path, "comanda.db");
    assert!(config.storage.wal_mode);
}

/// load_and_validate_str surfaces semantic validation failures.
#[test]
fn validation_rejects_bad_bridge_scheme() {
    let toml = r#"
[bridge]
url = "http://127.0.0.1:8790"
"#;

    let errors = load_and_validate_str(toml).expect_err("http scheme should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("bridge.url"))
    ));
}

/// Typo suggestions use Jaro-Winkler similarity.
#[test]
fn typo_suggestions_find_close_keys() {
    assert_eq!(
        suggest_key("max_tokes", &["api_key", "model", "max_tokens", "api_version"]),
        Some("max_tokens".to_string())
    );
    assert_eq!(suggest_key("xyzzy", &["api_key", "model"]), None);
}

/// Override precedence: a later provider overrides server.port from TOML,
/// the same way the `COMANDA_SERVER_PORT` env mapping does at runtime.
#[test]
fn later_provider_overrides_server_port() {
    // We test this via the Figment builder directly to control env vars in test
    use comanda_config::ComandaConfig;
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: ComandaConfig = Figment::new()
        .merge(Serialized::defaults(ComandaConfig::default()))
        .merge(Toml::string("[server]\nport = 1111\n"))
        .merge(("server.port", 9999))
        .extract()
        .expect("should merge env override");

    assert_eq!(config.server.port, 9999);
}

/// Dot-notation override maps to storage.database_path
/// (NOT storage.database.path -- the Env::map() contract).
#[test]
fn dot_notation_maps_to_database_path() {
    use comanda_config::ComandaConfig;
    use figment::{providers::Serialized, Figment};

    let config: ComandaConfig = Figment::new()
        .merge(Serialized::defaults(ComandaConfig::default()))
        .merge(("storage.database_path", "/var/lib/comanda/comanda.db"))
        .extract()
        .expect("should set database_path via dot notation");

    assert_eq!(config.storage.database_path, "/var/lib/comanda/comanda.db");
}
