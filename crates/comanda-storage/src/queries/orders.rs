// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finalized order operations.
//!
//! The item list is stored as a JSON column; the dashboard reads it as a
//! document, and this core never queries inside it.

use comanda_core::{ComandaError, FinalizedOrder};
use rusqlite::params;

use crate::database::Database;

fn map_json_err(e: serde_json::Error) -> ComandaError {
    ComandaError::Storage {
        source: Box::new(e),
    }
}

/// Persist a finalized order under its tenant, keyed by tracking code.
///
/// Plain INSERT: a tracking-code collision surfaces as a constraint error
/// instead of silently overwriting an existing order.
pub async fn insert_order(
    db: &Database,
    tenant_id: &str,
    order: &FinalizedOrder,
) -> Result<(), ComandaError> {
    let tenant_id = tenant_id.to_string();
    let order = order.clone();
    let items_json = serde_json::to_string(&order.items).map_err(map_json_err)?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO orders (tenant_id, tracking_code, customer_name, phone, address,
                                     items, total, status, payment_method, source, sender,
                                     delivery, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    tenant_id,
                    order.tracking_code,
                    order.customer_name,
                    order.phone,
                    order.address,
                    items_json,
                    order.total,
                    order.status,
                    order.payment_method,
                    order.source,
                    order.sender,
                    order.delivery,
                    order.created_at,
                    order.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the most recent finalized order for a sender, if any.
pub async fn get_last_order(
    db: &Database,
    tenant_id: &str,
    sender: &str,
) -> Result<Option<FinalizedOrder>, ComandaError> {
    let tenant_id = tenant_id.to_string();
    let sender = sender.to_string();

    let row: Option<(FinalizedOrder, String)> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT tracking_code, customer_name, phone, address, items, total, status,
                        payment_method, source, sender, delivery, created_at, updated_at
                 FROM orders
                 WHERE tenant_id = ?1 AND sender = ?2
                 ORDER BY created_at DESC
                 LIMIT 1",
            )?;
            let result = stmt.query_row(params![tenant_id, sender], |row| {
                let items_json: String = row.get(4)?;
                let order = FinalizedOrder {
                    tracking_code: row.get(0)?,
                    customer_name: row.get(1)?,
                    phone: row.get(2)?,
                    address: row.get(3)?,
                    items: Vec::new(),
                    total: row.get(5)?,
                    status: row.get(6)?,
                    payment_method: row.get(7)?,
                    source: row.get(8)?,
                    sender: row.get(9)?,
                    delivery: row.get(10)?,
                    created_at: row.get(11)?,
                    updated_at: row.get(12)?,
                };
                Ok((order, items_json))
            });
            match result {
                Ok(pair) => Ok(Some(pair)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match row {
        Some((mut order, items_json)) => {
            order.items = serde_json::from_str(&items_json).map_err(map_json_err)?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}
