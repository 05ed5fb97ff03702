// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for intent classification.
//!
//! One system prompt per call embedding the store identity, catalog, the
//! customer's last order, and the strict output contract; the customer's
//! message goes in as the single user turn.

use comanda_core::{format_brl, ClassifyContext, FinalizedOrder};

/// Builds the system prompt for one classification call.
pub fn build_system_prompt(ctx: &ClassifyContext) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Você é o atendente virtual de um restaurante no WhatsApp. \
         Interprete a mensagem do cliente e responda com UM ÚNICO objeto JSON, \
         sem nenhum texto antes ou depois.\n\n",
    );

    prompt.push_str("Dados do restaurante:\n");
    prompt.push_str(&format!("- Nome: {}\n", ctx.business.name));
    if let Some(ref hours) = ctx.business.hours {
        prompt.push_str(&format!("- Horário: {hours}\n"));
    }
    if let Some(ref address) = ctx.business.address {
        prompt.push_str(&format!("- Endereço: {address}\n"));
    }
    if let Some(ref phone) = ctx.business.phone {
        prompt.push_str(&format!("- Telefone: {phone}\n"));
    }
    if let Some(ref menu_url) = ctx.menu_url {
        prompt.push_str(&format!("- Cardápio completo: {menu_url}\n"));
    }

    if ctx.catalog.is_empty() {
        prompt.push_str("\nO cardápio ainda não foi cadastrado.\n");
    } else {
        prompt.push_str("\nItens disponíveis:\n");
        for item in &ctx.catalog {
            prompt.push_str(&format!("- {}\n", item.name));
        }
    }

    if let Some(ref greeting) = ctx.greeting {
        prompt.push_str(&format!(
            "\nNo primeiro contato, cumprimente o cliente com: \"{greeting}\"\n"
        ));
    }

    if let Some(ref last) = ctx.last_order {
        prompt.push_str(&format!(
            "\nÚltimo pedido deste cliente: {}\n",
            summarize_order(last)
        ));
    }

    if let Some(ref question) = ctx.prior_question {
        prompt.push_str(&format!(
            "\nVocê acabou de perguntar ao cliente: \"{question}\". \
             A mensagem dele é a resposta a essa pergunta.\n"
        ));
    }

    prompt.push_str(
        "\nFormato obrigatório da resposta:\n\
         {\"type\": \"order\" | \"reply\" | \"clarification\", \"data\": ...}\n\n\
         Regras:\n\
         - \"order\": o cliente fez um pedido completo. \"data\" é um objeto com \
         \"customer_name\", \"address\" (ou null), \"payment_method\" (ou null) e \
         \"items\", uma lista de {\"name\", \"quantity\", \"size\"}. Use apenas \
         itens do cardápio; não invente preços.\n\
         - \"clarification\": falta informação para fechar o pedido (sabor, \
         tamanho, quantidade). \"data\" é a pergunta, como texto.\n\
         - \"reply\": qualquer outra conversa (saudação, horário, endereço, \
         dúvida). \"data\" é a resposta, como texto curto e simpático.\n\
         - Nunca responda nada fora do objeto JSON.\n",
    );

    prompt
}

/// Builds the single user turn: the customer's message, verbatim.
pub fn build_user_message(ctx: &ClassifyContext) -> String {
    ctx.message.clone()
}

/// One-line summary of a past order for prompt context.
fn summarize_order(order: &FinalizedOrder) -> String {
    let items = order
        .items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{items} (total {})", format_brl(order.total))
}
