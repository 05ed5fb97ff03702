// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store accessor traits for tenant settings, catalogs, and orders.
//!
//! These are the narrow seams to the external document store. The stores
//! serialize their own writes; no cross-store transaction is attempted.

use async_trait::async_trait;

use crate::error::ComandaError;
use crate::types::{CatalogItem, FinalizedOrder, TenantConfig};

/// Reads and writes per-tenant settings.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Returns the tenant's settings, or `None` for an unknown tenant.
    async fn get_tenant_config(
        &self,
        tenant_id: &str,
    ) -> Result<Option<TenantConfig>, ComandaError>;

    /// Creates or replaces the tenant's settings.
    async fn set_tenant_config(
        &self,
        tenant_id: &str,
        config: &TenantConfig,
    ) -> Result<(), ComandaError>;
}

/// Reads a tenant's product list and price map.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_catalog(&self, tenant_id: &str) -> Result<Vec<CatalogItem>, ComandaError>;
}

/// Writes finalized orders and reads a sender's order history.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a finalized order under its tenant, keyed by tracking code.
    async fn create_order(
        &self,
        tenant_id: &str,
        order: &FinalizedOrder,
    ) -> Result<(), ComandaError>;

    /// Returns the sender's most recent finalized order, if any.
    async fn get_last_order(
        &self,
        tenant_id: &str,
        sender: &str,
    ) -> Result<Option<FinalizedOrder>, ComandaError>;
}
