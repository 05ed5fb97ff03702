// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog item operations.

use comanda_core::{CatalogItem, ComandaError};
use rusqlite::params;

use crate::database::Database;

/// Get a tenant's full product list, ordered by name.
pub async fn get_catalog(
    db: &Database,
    tenant_id: &str,
) -> Result<Vec<CatalogItem>, ComandaError> {
    let tenant_id = tenant_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT name, price FROM catalog_items WHERE tenant_id = ?1 ORDER BY name",
            )?;
            let rows = stmt.query_map(params![tenant_id], |row| {
                Ok(CatalogItem {
                    name: row.get(0)?,
                    price: row.get(1)?,
                })
            })?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(items)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace a tenant's full product list in one transaction.
///
/// The dashboard's menu import writes whole lists, never single rows.
pub async fn replace_catalog(
    db: &Database,
    tenant_id: &str,
    items: &[CatalogItem],
) -> Result<(), ComandaError> {
    let tenant_id = tenant_id.to_string();
    let items = items.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM catalog_items WHERE tenant_id = ?1",
                params![tenant_id],
            )?;
            for item in &items {
                tx.execute(
                    "INSERT INTO catalog_items (tenant_id, name, price) VALUES (?1, ?2, ?3)",
                    params![tenant_id, item.name, item.price],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn replace_and_get_catalog() {
        let (db, _dir) = setup_db().await;
        let items = vec![
            CatalogItem { name: "Pizza Calabresa".into(), price: 30.0 },
            CatalogItem { name: "Pizza Margherita".into(), price: 28.5 },
        ];

        replace_catalog(&db, "pizzaria-1", &items).await.unwrap();
        let retrieved = get_catalog(&db, "pizzaria-1").await.unwrap();
        assert_eq!(retrieved, items);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn catalogs_are_tenant_scoped() {
        let (db, _dir) = setup_db().await;
        let items = vec![CatalogItem { name: "Esfiha".into(), price: 8.0 }];

        replace_catalog(&db, "pizzaria-1", &items).await.unwrap();
        let other = get_catalog(&db, "pizzaria-2").await.unwrap();
        assert!(other.is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn replace_discards_previous_items() {
        let (db, _dir) = setup_db().await;

        replace_catalog(
            &db,
            "pizzaria-1",
            &[CatalogItem { name: "Pizza Calabresa".into(), price: 30.0 }],
        )
        .await
        .unwrap();
        replace_catalog(
            &db,
            "pizzaria-1",
            &[CatalogItem { name: "Pizza Portuguesa".into(), price: 32.0 }],
        )
        .await
        .unwrap();

        let retrieved = get_catalog(&db, "pizzaria-1").await.unwrap();
        assert_eq!(retrieved.len(), 1);
        assert_eq!(retrieved[0].name, "Pizza Portuguesa");

        db.close().await.unwrap();
    }
}
