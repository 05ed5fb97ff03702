// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Idempotent schema migrations, applied at every open.

/// Applies the schema. Every statement is `IF NOT EXISTS` so re-opening an
/// existing database is a no-op.
pub fn apply(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tenants (
            id          TEXT PRIMARY KEY,
            config      TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS catalog_items (
            tenant_id   TEXT NOT NULL,
            name        TEXT NOT NULL,
            price       REAL NOT NULL,
            PRIMARY KEY (tenant_id, name)
        );

        CREATE TABLE IF NOT EXISTS orders (
            tenant_id      TEXT NOT NULL,
            tracking_code  TEXT NOT NULL,
            customer_name  TEXT NOT NULL,
            phone          TEXT NOT NULL DEFAULT '',
            address        TEXT,
            items          TEXT NOT NULL,
            total          REAL NOT NULL,
            status         TEXT NOT NULL,
            payment_method TEXT,
            source         TEXT NOT NULL,
            sender         TEXT NOT NULL,
            delivery       INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            PRIMARY KEY (tenant_id, tracking_code)
        );

        CREATE INDEX IF NOT EXISTS idx_orders_sender
            ON orders (tenant_id, sender, created_at);",
    )
}
