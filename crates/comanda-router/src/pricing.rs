// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog price enrichment for AI-extracted draft orders.
//!
//! Prices supplied by the model are never trusted: every item is re-priced
//! from the tenant's catalog before the draft is shown to the customer.

use comanda_core::{CatalogItem, PendingOrder};
use tracing::debug;

/// Enriches a draft order in place: per-item unit price and line total from
/// the catalog, then the order total.
///
/// Items with no catalog match keep price 0 and contribute nothing to the
/// total. The total is never negative.
pub fn enrich_order(order: &mut PendingOrder, catalog: &[CatalogItem]) {
    for item in &mut order.items {
        match lookup(catalog, &item.name) {
            Some(price) => {
                item.unit_price = price.max(0.0);
                item.total = item.unit_price * f64::from(item.quantity);
            }
            None => {
                debug!(item = %item.name, "no catalog match, pricing at zero");
                item.unit_price = 0.0;
                item.total = 0.0;
            }
        }
    }
    order.total = order
        .items
        .iter()
        .map(|i| i.unit_price * f64::from(i.quantity))
        .sum::<f64>()
        .max(0.0);
}

/// Case-insensitive catalog lookup by item name.
fn lookup(catalog: &[CatalogItem], name: &str) -> Option<f64> {
    let wanted = name.trim();
    catalog
        .iter()
        .find(|c| c.name.trim().eq_ignore_ascii_case(wanted))
        .map(|c| c.price)
}

#[cfg(test)]
mod tests {
    use comanda_core::OrderItem;

    use super::*;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem { name: "Pizza Calabresa".into(), price: 30.0 },
            CatalogItem { name: "Pizza Margherita".into(), price: 28.5 },
            CatalogItem { name: "Refrigerante 2L".into(), price: 12.0 },
        ]
    }

    fn item(name: &str, quantity: u32) -> OrderItem {
        OrderItem {
            name: name.into(),
            quantity,
            size: None,
            unit_price: 0.0,
            total: 0.0,
        }
    }

    #[test]
    fn matched_items_get_catalog_prices() {
        let mut order = PendingOrder {
            items: vec![item("Pizza Calabresa", 2), item("Refrigerante 2L", 1)],
            ..PendingOrder::default()
        };
        enrich_order(&mut order, &catalog());

        assert_eq!(order.items[0].unit_price, 30.0);
        assert_eq!(order.items[0].total, 60.0);
        assert_eq!(order.items[1].unit_price, 12.0);
        assert_eq!(order.total, 72.0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut order = PendingOrder {
            items: vec![item("pizza calabresa", 1)],
            ..PendingOrder::default()
        };
        enrich_order(&mut order, &catalog());
        assert_eq!(order.items[0].unit_price, 30.0);
        assert_eq!(order.total, 30.0);
    }

    #[test]
    fn unmatched_items_price_at_zero() {
        let mut order = PendingOrder {
            items: vec![item("Pizza Calabresa", 1), item("Lasanha", 3)],
            ..PendingOrder::default()
        };
        enrich_order(&mut order, &catalog());

        assert_eq!(order.items[1].unit_price, 0.0);
        assert_eq!(order.items[1].total, 0.0);
        assert_eq!(order.total, 30.0);
    }

    #[test]
    fn model_supplied_prices_are_overwritten() {
        let mut order = PendingOrder {
            items: vec![OrderItem {
                name: "Pizza Calabresa".into(),
                quantity: 1,
                size: None,
                unit_price: 9999.0,
                total: 9999.0,
            }],
            total: 9999.0,
            ..PendingOrder::default()
        };
        enrich_order(&mut order, &catalog());

        assert_eq!(order.items[0].unit_price, 30.0);
        assert_eq!(order.total, 30.0);
    }

    #[test]
    fn total_is_never_negative() {
        let bad_catalog = vec![CatalogItem { name: "Item Errado".into(), price: -5.0 }];
        let mut order = PendingOrder {
            items: vec![item("Item Errado", 2)],
            ..PendingOrder::default()
        };
        enrich_order(&mut order, &bad_catalog);

        assert_eq!(order.items[0].unit_price, 0.0);
        assert_eq!(order.total, 0.0);
    }
}
