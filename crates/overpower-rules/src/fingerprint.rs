// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use overpower_core::canonical::{decode_token, encode_token, stable_json_hash_hex};
use overpower_model::{CardType, Deck, DeckCard};

use crate::DeckInput;

const SHARE_CODE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCodeError(pub String);

impl Display for ShareCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ShareCodeError {}

fn sorted_triples(cards: &[DeckCard]) -> Vec<(CardType, &str, u32)> {
    let mut triples: Vec<(CardType, &str, u32)> = cards
        .iter()
        .map(|c| (c.card_type, c.card_id.as_str(), c.quantity))
        .collect();
    triples.sort_unstable();
    triples
}

/// SHA-256 over the sorted `(type, card_id, quantity)` triples.
///
/// Card order, entry ids, alternate art and deck metadata do not affect it.
#[must_use]
pub fn deck_fingerprint(input: &DeckInput<'_>) -> String {
    let triples = sorted_triples(input.cards);
    // Serializing tuples of strings and integers cannot fail.
    stable_json_hash_hex(&triples).unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SharePayload {
    v: u32,
    n: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    r: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    l: bool,
    c: Vec<(CardType, String, u32)>,
}

/// Compact URL-safe code carrying a deck's name, flags and card list.
pub fn encode_share_code(deck: &Deck) -> Result<String, ShareCodeError> {
    let payload = SharePayload {
        v: SHARE_CODE_VERSION,
        n: deck.name.clone(),
        r: deck.reserve_character.clone(),
        l: deck.is_limited,
        c: sorted_triples(&deck.cards)
            .into_iter()
            .map(|(t, id, qty)| (t, id.to_string(), qty))
            .collect(),
    };
    encode_token(&payload).map_err(|e| ShareCodeError(format!("encode share code failed: {e}")))
}

pub fn decode_share_code(code: &str, deck_id: &str) -> Result<Deck, ShareCodeError> {
    let value = decode_token(code.trim()).map_err(ShareCodeError)?;
    let payload: SharePayload = serde_json::from_value(value)
        .map_err(|e| ShareCodeError(format!("invalid share code payload: {e}")))?;
    if payload.v != SHARE_CODE_VERSION {
        return Err(ShareCodeError(format!(
            "unsupported share code version {}",
            payload.v
        )));
    }
    let mut deck = Deck::new(deck_id, &payload.n);
    deck.is_limited = payload.l;
    for (card_type, card_id, quantity) in payload.c {
        deck.add_card(card_type, &card_id, quantity, None)
            .map_err(|e| ShareCodeError(e.0))?;
    }
    deck.set_reserve_character(payload.r.as_deref())
        .map_err(|e| ShareCodeError(e.0))?;
    Ok(deck)
}
