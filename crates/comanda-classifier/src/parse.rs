// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Defensive parsing of model output into the [`Intent`] sum type.
//!
//! The model is instructed to answer with a bare JSON object, but it may
//! still wrap it in prose or code fences. The parser extracts the first
//! balanced `{...}` block and validates it strictly: anything that is not
//! one of the three known shapes is rejected.

use comanda_core::{Intent, PendingOrder};
use tracing::debug;

/// Extracts the first balanced `{...}` block from raw model output.
///
/// Brace counting is string-aware: braces inside JSON string literals
/// (including escaped quotes) do not affect the depth.
pub fn extract_json_block(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let bytes = raw.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses raw model output into an [`Intent`].
///
/// Returns `None` when no balanced JSON block exists, the block is not
/// valid JSON, the `type` tag is unknown, or the `data` payload does not
/// match the tag's expected shape.
pub fn parse_intent(raw: &str) -> Option<Intent> {
    let block = extract_json_block(raw)?;
    let value: serde_json::Value = match serde_json::from_str(block) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "model output block is not valid JSON");
            return None;
        }
    };

    let type_tag = value.get("type")?.as_str()?;
    let data = value.get("data")?;

    match type_tag {
        "order" => {
            let order: PendingOrder = serde_json::from_value(data.clone()).ok()?;
            if order.items.is_empty() {
                debug!("order intent rejected: empty item list");
                return None;
            }
            Some(Intent::Order(order))
        }
        "reply" => Some(Intent::Reply(data.as_str()?.to_string())),
        "clarification" => Some(Intent::Clarification(data.as_str()?.to_string())),
        other => {
            debug!(tag = other, "unknown intent tag rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_object() {
        let raw = r#"{"type": "reply", "data": "oi"}"#;
        assert_eq!(extract_json_block(raw), Some(raw));
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let raw = "Claro! Aqui está:\n{\"type\": \"reply\", \"data\": \"oi\"}\nEspero ter ajudado.";
        assert_eq!(
            extract_json_block(raw),
            Some(r#"{"type": "reply", "data": "oi"}"#)
        );
    }

    #[test]
    fn extraction_handles_nested_objects() {
        let raw = r#"{"type": "order", "data": {"items": [{"name": "x"}]}} trailing"#;
        assert_eq!(
            extract_json_block(raw),
            Some(r#"{"type": "order", "data": {"items": [{"name": "x"}]}}"#)
        );
    }

    #[test]
    fn extraction_ignores_braces_inside_strings() {
        let raw = r#"{"type": "reply", "data": "use {chaves} } assim"}"#;
        assert_eq!(extract_json_block(raw), Some(raw));
    }

    #[test]
    fn extraction_handles_escaped_quotes() {
        let raw = r#"{"type": "reply", "data": "diga \"oi\" {"}"#;
        assert_eq!(extract_json_block(raw), Some(raw));
    }

    #[test]
    fn no_block_returns_none() {
        assert!(extract_json_block("sem json aqui").is_none());
        assert!(extract_json_block("{ nunca fecha").is_none());
    }

    #[test]
    fn parses_reply_intent() {
        let intent = parse_intent(r#"{"type": "reply", "data": "Olá! Como posso ajudar?"}"#);
        assert_eq!(intent, Some(Intent::Reply("Olá! Como posso ajudar?".into())));
    }

    #[test]
    fn parses_clarification_intent() {
        let intent =
            parse_intent(r#"{"type": "clarification", "data": "Qual o tamanho da pizza?"}"#);
        assert_eq!(
            intent,
            Some(Intent::Clarification("Qual o tamanho da pizza?".into()))
        );
    }

    #[test]
    fn parses_order_intent() {
        let raw = r#"{
            "type": "order",
            "data": {
                "customer_name": "João",
                "address": "Rua A, 1",
                "payment_method": "pix",
                "items": [{"name": "Pizza Calabresa", "quantity": 1, "size": null}]
            }
        }"#;
        match parse_intent(raw) {
            Some(Intent::Order(order)) => {
                assert_eq!(order.customer_name, "João");
                assert_eq!(order.items.len(), 1);
                assert_eq!(order.items[0].name, "Pizza Calabresa");
            }
            other => panic!("expected Order intent, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_type_tag() {
        assert!(parse_intent(r#"{"type": "refund", "data": "x"}"#).is_none());
    }

    #[test]
    fn rejects_non_string_reply_data() {
        assert!(parse_intent(r#"{"type": "reply", "data": {"text": "oi"}}"#).is_none());
    }

    #[test]
    fn rejects_order_without_items() {
        assert!(parse_intent(r#"{"type": "order", "data": {"customer_name": "x", "items": []}}"#)
            .is_none());
    }

    #[test]
    fn rejects_missing_data_field() {
        assert!(parse_intent(r#"{"type": "reply"}"#).is_none());
    }
}
