// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use overpower_catalog::CardCatalog;
use overpower_model::{CardType, CatalogCard, CharacterCard, DeckCard};

use crate::input::copies;
use crate::DeckInput;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedCard<'a> {
    pub entry: &'a DeckCard,
    pub card: &'a CatalogCard,
}

/// Deck entries joined with their catalog records.
#[derive(Debug, Default)]
pub(crate) struct ResolvedDeck<'a> {
    pub cards: Vec<ResolvedCard<'a>>,
    pub unknown: Vec<&'a DeckCard>,
}

impl<'a> ResolvedDeck<'a> {
    pub fn of_type(&self, card_type: CardType) -> impl Iterator<Item = &ResolvedCard<'a>> + '_ {
        self.cards
            .iter()
            .filter(move |c| c.entry.card_type == card_type)
    }

    /// Copies of known cards of one type; unknown entries do not count.
    pub fn count_of(&self, card_type: CardType) -> u32 {
        copies(self.of_type(card_type).map(|c| c.entry))
    }

    pub fn draw_pile_count(&self) -> u32 {
        copies(
            self.cards
                .iter()
                .filter(|c| c.entry.card_type.is_draw_pile())
                .map(|c| c.entry),
        )
    }

    pub fn characters(&self) -> impl Iterator<Item = (&'a CharacterCard, &'a DeckCard)> + '_ {
        self.cards
            .iter()
            .filter_map(|c| c.card.as_character().map(|character| (character, c.entry)))
    }

    pub fn mission_sets(&self) -> BTreeSet<&'a str> {
        self.of_type(CardType::Mission)
            .filter_map(|c| c.card.mission_set())
            .collect()
    }
}

pub(crate) fn resolve<'a>(input: &DeckInput<'a>, catalog: &'a dyn CardCatalog) -> ResolvedDeck<'a> {
    let mut out = ResolvedDeck::default();
    let mut seen_unknown = BTreeSet::new();
    for entry in input.cards {
        match catalog.get(entry.card_type, &entry.card_id) {
            Some(card) => out.cards.push(ResolvedCard { entry, card }),
            None => {
                if seen_unknown.insert(entry.key()) {
                    out.unknown.push(entry);
                }
            }
        }
    }
    out
}
