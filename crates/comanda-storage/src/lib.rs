// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed stores for the Comanda order bot.
//!
//! Implements the `comanda-core` store traits (tenants, catalogs, orders)
//! over a single tokio-rusqlite connection with WAL mode and idempotent
//! migrations applied at open.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
