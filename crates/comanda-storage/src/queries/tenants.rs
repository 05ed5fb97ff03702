// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tenant settings CRUD operations.
//!
//! Settings are stored as one JSON document per tenant so the dashboard can
//! evolve the shape without schema migrations here.

use comanda_core::{ComandaError, TenantConfig};
use rusqlite::params;

use crate::database::Database;

/// Create or replace a tenant's settings document.
pub async fn upsert_tenant_config(
    db: &Database,
    tenant_id: &str,
    config: &TenantConfig,
) -> Result<(), ComandaError> {
    let tenant_id = tenant_id.to_string();
    let json = serde_json::to_string(config).map_err(|e| ComandaError::Storage {
        source: Box::new(e),
    })?;
    let now = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tenants (id, config, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (id) DO UPDATE SET config = ?2, updated_at = ?3",
                params![tenant_id, json, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a tenant's settings, or `None` for an unknown tenant.
pub async fn get_tenant_config(
    db: &Database,
    tenant_id: &str,
) -> Result<Option<TenantConfig>, ComandaError> {
    let tenant_id = tenant_id.to_string();
    let json: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT config FROM tenants WHERE id = ?1")?;
            let result = stmt.query_row(params![tenant_id], |row| row.get(0));
            match result {
                Ok(json) => Ok(Some(json)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match json {
        Some(json) => {
            let config = serde_json::from_str(&json).map_err(|e| ComandaError::Storage {
                source: Box::new(e),
            })?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}
