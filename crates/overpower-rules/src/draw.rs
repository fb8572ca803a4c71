// SPDX-License-Identifier: Apache-2.0

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use overpower_catalog::CardCatalog;
use overpower_model::{CardType, DeckCard};

use crate::input::copies;
use crate::limits::UNKNOWN_CARD_NAME;
use crate::{DeckInput, DeckRules};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrawError {
    NotEnoughCards { available: u32, required: u32 },
}

impl Display for DrawError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEnoughCards {
                available,
                required,
            } => write!(
                f,
                "deck needs at least {required} playable cards to draw a hand (found {available})"
            ),
        }
    }
}

impl std::error::Error for DrawError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawnCard {
    pub card_type: CardType,
    pub card_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawnHand {
    pub cards: Vec<DrawnCard>,
    /// Set when an event in the opening hand earned an extra draw.
    pub extra_draw: bool,
    pub pile_size: u32,
}

/// Deals an opening hand from the playable draw pile.
///
/// Positions are sampled from the pile without materializing it, so the cost
/// depends on the number of deck entries rather than on copy counts. An event
/// among the first `hand_size` cards earns one more card, provided the pile is
/// larger than the hand.
pub fn draw_hand<R: Rng + ?Sized>(
    input: &DeckInput<'_>,
    catalog: &dyn CardCatalog,
    rules: &DeckRules,
    rng: &mut R,
) -> Result<DrawnHand, DrawError> {
    let playable: Vec<&DeckCard> = input
        .cards
        .iter()
        .filter(|c| c.card_type.is_draw_pile() && !c.exclude_from_draw)
        .collect();
    let pile_size = copies(playable.iter().copied());
    if pile_size < rules.min_playable_for_draw {
        tracing::debug!(pile_size, "draw pile too small for a hand");
        return Err(DrawError::NotEnoughCards {
            available: pile_size,
            required: rules.min_playable_for_draw,
        });
    }

    let pile_len = usize::try_from(pile_size).unwrap_or(usize::MAX);
    let hand_size = rules.hand_size as usize;
    let amount = hand_size.saturating_add(1).min(pile_len);
    let mut cards: Vec<DrawnCard> = index::sample(rng, pile_len, amount)
        .iter()
        .filter_map(|position| entry_at(&playable, position))
        .map(|entry| DrawnCard {
            card_type: entry.card_type,
            card_id: entry.card_id.clone(),
            name: catalog
                .get(entry.card_type, &entry.card_id)
                .map_or_else(|| UNKNOWN_CARD_NAME.to_string(), |card| card.display_name()),
        })
        .collect();
    let has_event = cards
        .iter()
        .take(hand_size)
        .any(|c| c.card_type == CardType::Event);
    let extra_draw = has_event && pile_len > hand_size;
    cards.truncate(if extra_draw { hand_size + 1 } else { hand_size });
    tracing::debug!(pile_size, extra_draw, "hand drawn");
    Ok(DrawnHand {
        cards,
        extra_draw,
        pile_size,
    })
}

/// Entry holding the `position`-th copy of the pile, in deck order.
fn entry_at<'a>(entries: &[&'a DeckCard], mut position: usize) -> Option<&'a DeckCard> {
    for entry in entries {
        let quantity = entry.quantity as usize;
        if position < quantity {
            return Some(entry);
        }
        position -= quantity;
    }
    None
}
