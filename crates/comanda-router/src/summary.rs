// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message rendering for the ordering flow.

use comanda_core::{format_brl, FinalizedOrder, OrderItem, PendingOrder};

/// Sent once per sender when the classifier is unavailable.
pub const AI_UNAVAILABLE: &str = "Nosso atendimento automático está temporariamente \
indisponível. Assim que possível um atendente vai te responder por aqui.";

/// Sent when anything in the pipeline fails unexpectedly.
pub const GENERIC_ERROR: &str = "Desculpe, tivemos um problema ao processar sua mensagem. \
Pode tentar de novo?";

/// Sent when the order could not be persisted.
pub const PERSIST_FAILED: &str = "Desculpe, não conseguimos registrar seu pedido agora. \
Pode tentar novamente em alguns instantes?";

fn item_line(item: &OrderItem) -> String {
    let size = item
        .size
        .as_deref()
        .map(|s| format!(" ({s})"))
        .unwrap_or_default();
    format!(
        "- {}x {}{}: {}",
        item.quantity,
        item.name,
        size,
        format_brl(item.total)
    )
}

/// Renders the confirmation summary asking for an explicit "sim".
pub fn confirmation_summary(order: &PendingOrder) -> String {
    let mut text = String::from("Confira seu pedido:\n");
    for item in &order.items {
        text.push_str(&item_line(item));
        text.push('\n');
    }
    text.push_str(&format!("Total: {}\n", format_brl(order.total)));
    if let Some(ref address) = order.address {
        text.push_str(&format!("Entrega em: {address}\n"));
    }
    if let Some(ref payment) = order.payment_method {
        text.push_str(&format!("Pagamento: {payment}\n"));
    }
    text.push_str("\nResponda *sim* para confirmar, ou me diga o que mudar.");
    text
}

/// Renders the receipt sent after the order is persisted.
pub fn receipt(order: &FinalizedOrder) -> String {
    let mut text = format!(
        "Pedido confirmado! ✅\nCódigo de acompanhamento: *{}*\n\n",
        order.tracking_code
    );
    for item in &order.items {
        text.push_str(&item_line(item));
        text.push('\n');
    }
    text.push_str(&format!("Total: {}\n", format_brl(order.total)));
    match order.address {
        Some(ref address) => text.push_str(&format!("Entrega em: {address}\n")),
        None => text.push_str("Retirada no balcão\n"),
    }
    if let Some(ref payment) = order.payment_method {
        text.push_str(&format!("Pagamento: {payment}\n"));
    }
    text.push_str("\nObrigado pela preferência!");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingOrder {
        PendingOrder {
            customer_name: "Maria".into(),
            address: Some("Rua das Flores, 10".into()),
            items: vec![
                OrderItem {
                    name: "Pizza Calabresa".into(),
                    quantity: 1,
                    size: None,
                    unit_price: 30.0,
                    total: 30.0,
                },
                OrderItem {
                    name: "Refrigerante 2L".into(),
                    quantity: 2,
                    size: Some("2L".into()),
                    unit_price: 12.0,
                    total: 24.0,
                },
            ],
            payment_method: Some("pix".into()),
            total: 54.0,
        }
    }

    #[test]
    fn confirmation_lists_items_prices_and_total() {
        let text = confirmation_summary(&pending());
        assert!(text.contains("1x Pizza Calabresa: R$ 30.00"));
        assert!(text.contains("2x Refrigerante 2L (2L): R$ 24.00"));
        assert!(text.contains("Total: R$ 54.00"));
        assert!(text.contains("Entrega em: Rua das Flores, 10"));
        assert!(text.contains("Pagamento: pix"));
        assert!(text.contains("*sim*"));
    }

    #[test]
    fn confirmation_omits_absent_address_and_payment() {
        let mut order = pending();
        order.address = None;
        order.payment_method = None;
        let text = confirmation_summary(&order);
        assert!(!text.contains("Entrega em"));
        assert!(!text.contains("Pagamento"));
    }

    #[test]
    fn receipt_contains_tracking_code_and_total() {
        let order = FinalizedOrder {
            tracking_code: "A1B2C3D4".into(),
            customer_name: "Maria".into(),
            phone: "5511999990000".into(),
            address: None,
            items: pending().items,
            total: 54.0,
            status: "new".into(),
            payment_method: Some("pix".into()),
            source: "chat".into(),
            sender: "5511999990000@c.us".into(),
            delivery: false,
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        let text = receipt(&order);
        assert!(text.contains("A1B2C3D4"));
        assert!(text.contains("Total: R$ 54.00"));
        assert!(text.contains("Retirada no balcão"));
    }
}
