// SPDX-License-Identifier: Apache-2.0

use overpower_model::{CardType, Deck, DeckCard};

/// The parts of a deck the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct DeckInput<'a> {
    pub cards: &'a [DeckCard],
    pub reserve_character: Option<&'a str>,
    pub is_limited: bool,
}

impl<'a> DeckInput<'a> {
    #[must_use]
    pub const fn new(cards: &'a [DeckCard]) -> Self {
        Self {
            cards,
            reserve_character: None,
            is_limited: false,
        }
    }

    #[must_use]
    pub fn count_of(&self, card_type: CardType) -> u32 {
        copies(self.cards.iter().filter(|c| c.card_type == card_type))
    }

    #[must_use]
    pub fn total_cards(&self) -> u32 {
        copies(self.cards.iter())
    }

    #[must_use]
    pub fn draw_pile_count(&self) -> u32 {
        copies(self.cards.iter().filter(|c| c.card_type.is_draw_pile()))
    }
}

/// Saturating copy count over deck entries.
pub(crate) fn copies<'a>(entries: impl Iterator<Item = &'a DeckCard>) -> u32 {
    entries.fold(0u32, |acc, c| acc.saturating_add(c.quantity))
}

impl<'a> From<&'a Deck> for DeckInput<'a> {
    fn from(deck: &'a Deck) -> Self {
        Self {
            cards: &deck.cards,
            reserve_character: deck.reserve_character.as_deref(),
            is_limited: deck.is_limited,
        }
    }
}
