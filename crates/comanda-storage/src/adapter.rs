// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the store accessor traits.

use async_trait::async_trait;

use comanda_config::model::StorageConfig;
use comanda_core::{
    CatalogItem, CatalogStore, ComandaError, FinalizedOrder, OrderStore, TenantConfig,
    TenantStore,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed implementation of [`TenantStore`], [`CatalogStore`], and
/// [`OrderStore`].
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens the database described by `config` and returns the store.
    pub async fn open(config: &StorageConfig) -> Result<Self, ComandaError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        Ok(Self { db })
    }

    /// Wraps an already-open database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Replaces a tenant's catalog. Exposed for seeding and the menu import.
    pub async fn replace_catalog(
        &self,
        tenant_id: &str,
        items: &[CatalogItem],
    ) -> Result<(), ComandaError> {
        queries::catalog::replace_catalog(&self.db, tenant_id, items).await
    }
}

#[async_trait]
impl TenantStore for SqliteStore {
    async fn get_tenant_config(
        &self,
        tenant_id: &str,
    ) -> Result<Option<TenantConfig>, ComandaError> {
        queries::tenants::get_tenant_config(&self.db, tenant_id).await
    }

    async fn set_tenant_config(
        &self,
        tenant_id: &str,
        config: &TenantConfig,
    ) -> Result<(), ComandaError> {
        queries::tenants::upsert_tenant_config(&self.db, tenant_id, config).await
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn get_catalog(&self, tenant_id: &str) -> Result<Vec<CatalogItem>, ComandaError> {
        queries::catalog::get_catalog(&self.db, tenant_id).await
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn create_order(
        &self,
        tenant_id: &str,
        order: &FinalizedOrder,
    ) -> Result<(), ComandaError> {
        queries::orders::insert_order(&self.db, tenant_id, order).await
    }

    async fn get_last_order(
        &self,
        tenant_id: &str,
        sender: &str,
    ) -> Result<Option<FinalizedOrder>, ComandaError> {
        queries::orders::get_last_order(&self.db, tenant_id, sender).await
    }
}
