// SPDX-FileCopyrightText: 2026 Comanda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Affirmation detection for the confirmation fast path.
//!
//! A trivial "sim" never goes to the model: matching here skips the
//! classifier entirely and finalizes the stored draft. Anything else falls
//! through to full classification as an order modification.

/// Messages accepted as an explicit order confirmation, compared against
/// the trimmed, lowercased body.
const AFFIRMATIVES: &[&str] = &[
    "sim",
    "s",
    "isso",
    "correto",
    "pode confirmar",
    "confirmo",
    "confirmar",
    "ok",
];

/// Returns true when the message is an explicit confirmation.
pub fn is_affirmative(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    AFFIRMATIVES.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sim_is_affirmative() {
        assert!(is_affirmative("sim"));
        assert!(is_affirmative("s"));
        assert!(is_affirmative("isso"));
        assert!(is_affirmative("pode confirmar"));
    }

    #[test]
    fn casing_and_whitespace_are_normalized() {
        assert!(is_affirmative("  SIM  "));
        assert!(is_affirmative("Correto"));
        assert!(is_affirmative("OK"));
    }

    #[test]
    fn modifications_are_not_affirmative() {
        assert!(!is_affirmative("sim, mas troca a calabresa por margherita"));
        assert!(!is_affirmative("não"));
        assert!(!is_affirmative("quero mais uma"));
        assert!(!is_affirmative(""));
    }
}
