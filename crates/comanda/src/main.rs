// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comanda - WhatsApp order-taking automation for restaurants.
//!
//! This is the binary entry point for the Comanda server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod serve;

/// Comanda - WhatsApp order-taking automation for restaurants.
#[derive(Parser, Debug)]
#[command(name = "comanda", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Comanda server.
    Serve,
    /// Load and print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match comanda_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            comanda_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                tracing::error!(error = %e, "server exited with error");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("server.host = {}", config.server.host);
            println!("server.port = {}", config.server.port);
            println!("server.log_level = {}", config.server.log_level);
            println!("bridge.url = {}", config.bridge.url);
            println!("storage.database_path = {}", config.storage.database_path);
            println!("storage.wal_mode = {}", config.storage.wal_mode);
            println!("anthropic.model = {}", config.anthropic.model);
            println!("anthropic.max_tokens = {}", config.anthropic.max_tokens);
            println!(
                "anthropic.api_key = {}",
                if config.anthropic.api_key.is_some() {
                    "<set>"
                } else {
                    "<unset>"
                }
            );
        }
        None => {
            println!("comanda: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = comanda_config::load_and_validate()
            .expect("default config should be valid");
        assert_eq!(config.server.port, 8080);
    }
}
