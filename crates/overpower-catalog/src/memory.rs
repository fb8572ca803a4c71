// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use overpower_model::{CardType, CatalogCard};

use crate::{CardCatalog, CatalogError};

/// Catalog held entirely in memory, keyed by card type then id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCatalog {
    cards: BTreeMap<CardType, BTreeMap<String, CatalogCard>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<CatalogCard>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, card: CatalogCard) -> Result<(), CatalogError> {
        let card_type = card.card_type();
        let id = card.id().to_string();
        let by_id = self.cards.entry(card_type).or_default();
        if by_id.contains_key(&id) {
            return Err(CatalogError::Duplicate { card_type, id });
        }
        by_id.insert(id, card);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogCard> {
        self.cards.values().flat_map(BTreeMap::values)
    }
}

impl CardCatalog for InMemoryCatalog {
    fn get(&self, card_type: CardType, id: &str) -> Option<&CatalogCard> {
        self.cards.get(&card_type).and_then(|by_id| by_id.get(id))
    }

    fn list(&self, card_type: CardType) -> Vec<&CatalogCard> {
        self.cards
            .get(&card_type)
            .map(|by_id| by_id.values().collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.cards.values().map(BTreeMap::len).sum()
    }
}
