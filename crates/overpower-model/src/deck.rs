// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{CardType, ValidationError};

pub const DECK_NAME_MAX_LEN: usize = 100;
/// Copies of one card a single deck entry may hold.
pub const DECK_CARD_QUANTITY_MAX: u32 = 99;

fn saturating_total<'a>(cards: impl Iterator<Item = &'a DeckCard>) -> u32 {
    cards.fold(0u32, |acc, c| acc.saturating_add(c.quantity))
}

/// One entry of a deck: a catalog card reference and how many copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckCard {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(rename = "cardId", alias = "card_id")]
    pub card_id: String,
    pub quantity: u32,
    #[serde(
        default,
        rename = "selectedAlternateImage",
        alias = "selected_alternate_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_alternate_image: Option<String>,
    /// Pre-placed cards start in play and never enter the draw pile.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude_from_draw: bool,
}

impl DeckCard {
    #[must_use]
    pub fn new(card_type: CardType, card_id: &str, quantity: u32) -> Self {
        Self {
            id: entry_id(card_type, card_id),
            card_type,
            card_id: card_id.to_string(),
            quantity,
            selected_alternate_image: None,
            exclude_from_draw: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> (CardType, &str) {
        (self.card_type, self.card_id.as_str())
    }
}

fn entry_id(card_type: CardType, card_id: &str) -> String {
    format!("{}_{card_id}", card_type.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deck {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_limited: bool,
    /// Catalog id of the character held in reserve.
    #[serde(default)]
    pub reserve_character: Option<String>,
    #[serde(default)]
    pub ui_preferences: Option<serde_json::Value>,
    #[serde(default)]
    pub cards: Vec<DeckCard>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Deck {
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id: None,
            name: name.to_string(),
            description: None,
            is_limited: false,
            reserve_character: None,
            ui_preferences: None,
            cards: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn add_card(
        &mut self,
        card_type: CardType,
        card_id: &str,
        quantity: u32,
        alternate_image: Option<&str>,
    ) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError("quantity must be > 0".to_string()));
        }
        let card_id = card_id.trim();
        if card_id.is_empty() {
            return Err(ValidationError("card id must not be empty".to_string()));
        }
        if let Some(existing) = self
            .cards
            .iter_mut()
            .find(|c| c.card_type == card_type && c.card_id == card_id)
        {
            let merged = existing.quantity.saturating_add(quantity);
            if merged > DECK_CARD_QUANTITY_MAX {
                return Err(ValidationError(format!(
                    "{card_type} card `{card_id}` would exceed {DECK_CARD_QUANTITY_MAX} copies"
                )));
            }
            existing.quantity = merged;
            if let Some(image) = alternate_image {
                existing.selected_alternate_image = Some(image.to_string());
            }
            return Ok(());
        }
        if quantity > DECK_CARD_QUANTITY_MAX {
            return Err(ValidationError(format!(
                "quantity must be <= {DECK_CARD_QUANTITY_MAX}"
            )));
        }
        let mut entry = DeckCard::new(card_type, card_id, quantity);
        entry.selected_alternate_image = alternate_image.map(ToString::to_string);
        self.cards.push(entry);
        Ok(())
    }

    pub fn remove_card(
        &mut self,
        card_type: CardType,
        card_id: &str,
        quantity: u32,
    ) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError("quantity must be > 0".to_string()));
        }
        let card_id = card_id.trim();
        let position = self
            .cards
            .iter()
            .position(|c| c.card_type == card_type && c.card_id == card_id)
            .ok_or_else(|| {
                ValidationError(format!("deck has no {card_type} card `{card_id}`"))
            })?;
        let entry = &mut self.cards[position];
        if quantity >= entry.quantity {
            self.cards.remove(position);
            if card_type == CardType::Character
                && self.reserve_character.as_deref() == Some(card_id)
            {
                self.reserve_character = None;
            }
        } else {
            entry.quantity -= quantity;
        }
        Ok(())
    }

    pub fn set_reserve_character(&mut self, card_id: Option<&str>) -> Result<(), ValidationError> {
        match card_id {
            None => {
                self.reserve_character = None;
                Ok(())
            }
            Some(id) => {
                let present = self
                    .cards
                    .iter()
                    .any(|c| c.card_type == CardType::Character && c.card_id == id);
                if !present {
                    return Err(ValidationError(format!(
                        "reserve character `{id}` is not a character in this deck"
                    )));
                }
                self.reserve_character = Some(id.to_string());
                Ok(())
            }
        }
    }

    /// Structural checks independent of any game rule.
    pub fn validate_shape(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError("deck name must not be empty".to_string()));
        }
        if name.chars().count() > DECK_NAME_MAX_LEN {
            return Err(ValidationError(format!(
                "deck name exceeds max length {DECK_NAME_MAX_LEN}"
            )));
        }
        let mut keys = BTreeSet::new();
        let mut entry_ids = BTreeSet::new();
        for card in &self.cards {
            if card.quantity == 0 {
                return Err(ValidationError(format!(
                    "deck card `{}` has zero quantity",
                    card.id
                )));
            }
            if card.quantity > DECK_CARD_QUANTITY_MAX {
                return Err(ValidationError(format!(
                    "deck card `{}` has {} copies (max {DECK_CARD_QUANTITY_MAX})",
                    card.id, card.quantity
                )));
            }
            if !keys.insert(card.key()) {
                return Err(ValidationError(format!(
                    "duplicate deck entry for {} card `{}`",
                    card.card_type, card.card_id
                )));
            }
            if !entry_ids.insert(card.id.as_str()) {
                return Err(ValidationError(format!(
                    "duplicate deck card id `{}`",
                    card.id
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn total_cards(&self) -> u32 {
        saturating_total(self.cards.iter())
    }

    #[must_use]
    pub fn draw_pile_count(&self) -> u32 {
        saturating_total(self.cards.iter().filter(|c| c.card_type.is_draw_pile()))
    }

    #[must_use]
    pub fn count_of(&self, card_type: CardType) -> u32 {
        saturating_total(self.cards.iter().filter(|c| c.card_type == card_type))
    }

    #[must_use]
    pub fn type_breakdown(&self) -> BTreeMap<CardType, u32> {
        let mut out = BTreeMap::new();
        for card in &self.cards {
            let slot = out.entry(card.card_type).or_insert(0u32);
            *slot = slot.saturating_add(card.quantity);
        }
        out
    }

    #[must_use]
    pub fn unique_types(&self) -> Vec<CardType> {
        self.type_breakdown().into_keys().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        let mut deck = Deck::new("d1", "Jungle Rush");
        deck.add_card(CardType::Character, "tarzan", 1, None)
            .expect("add character");
        deck.add_card(CardType::Power, "p5e", 2, None).expect("add power");
        deck.add_card(CardType::Mission, "m1", 1, None)
            .expect("add mission");
        deck
    }

    #[test]
    fn adding_an_existing_card_merges_quantity() {
        let mut deck = deck();
        deck.add_card(CardType::Power, "p5e", 3, Some("alt-1.webp"))
            .expect("merge");
        assert_eq!(deck.cards.len(), 3);
        assert_eq!(deck.count_of(CardType::Power), 5);
        assert_eq!(
            deck.cards[1].selected_alternate_image.as_deref(),
            Some("alt-1.webp")
        );
        assert!(deck.add_card(CardType::Power, "p5e", 0, None).is_err());
    }

    #[test]
    fn removing_reserve_character_clears_reserve() {
        let mut deck = deck();
        deck.set_reserve_character(Some("tarzan")).expect("reserve");
        deck.remove_card(CardType::Character, "tarzan", 1)
            .expect("remove");
        assert_eq!(deck.reserve_character, None);
        assert!(deck.remove_card(CardType::Character, "tarzan", 1).is_err());
    }

    #[test]
    fn partial_removal_decrements() {
        let mut deck = deck();
        deck.remove_card(CardType::Power, " p5e ", 1).expect("remove");
        assert_eq!(deck.count_of(CardType::Power), 1);
    }

    #[test]
    fn removing_zero_copies_is_rejected() {
        let mut deck = deck();
        let err = deck
            .remove_card(CardType::Power, "p5e", 0)
            .expect_err("zero removal");
        assert_eq!(err.0, "quantity must be > 0");
        assert_eq!(deck.count_of(CardType::Power), 2);
    }

    #[test]
    fn quantities_are_capped_per_entry() {
        let mut deck = deck();
        assert!(deck
            .add_card(CardType::Power, "p7c", DECK_CARD_QUANTITY_MAX + 1, None)
            .is_err());
        deck.add_card(CardType::Power, "p5e", DECK_CARD_QUANTITY_MAX - 2, None)
            .expect("fill to cap");
        assert!(deck.add_card(CardType::Power, "p5e", 1, None).is_err());
        assert_eq!(deck.count_of(CardType::Power), DECK_CARD_QUANTITY_MAX);
    }

    #[test]
    fn oversized_entries_fail_shape_and_counts_saturate() {
        let mut deck = deck();
        deck.cards.push(DeckCard::new(CardType::Event, "e1", u32::MAX));
        assert_eq!(deck.total_cards(), u32::MAX);
        assert_eq!(deck.draw_pile_count(), u32::MAX);
        assert_eq!(deck.type_breakdown()[&CardType::Event], u32::MAX);
        let err = deck.validate_shape().expect_err("too many copies");
        assert!(err.0.contains("max 99"));
    }

    #[test]
    fn reserve_must_be_a_deck_character() {
        let mut deck = deck();
        assert!(deck.set_reserve_character(Some("jane")).is_err());
        assert!(deck.set_reserve_character(Some("p5e")).is_err());
    }

    #[test]
    fn draw_pile_excludes_characters_missions_and_locations() {
        let deck = deck();
        assert_eq!(deck.total_cards(), 4);
        assert_eq!(deck.draw_pile_count(), 2);
        assert_eq!(
            deck.unique_types(),
            vec![CardType::Character, CardType::Power, CardType::Mission]
        );
    }

    #[test]
    fn shape_rejects_duplicates_and_blank_names() {
        let mut deck = deck();
        deck.validate_shape().expect("valid shape");
        deck.cards.push(DeckCard::new(CardType::Power, "p5e", 1));
        assert!(deck.validate_shape().is_err());
        let blank = Deck::new("d2", "   ");
        assert!(blank.validate_shape().is_err());
    }

    #[test]
    fn deck_card_reads_camel_case_wire_names() {
        let card: DeckCard = serde_json::from_str(
            r#"{"id":"x","type":"ally-universe","cardId":"a1","quantity":2,"selectedAlternateImage":"b.webp"}"#,
        )
        .expect("decode");
        assert_eq!(card.card_type, CardType::AllyUniverse);
        assert_eq!(card.card_id, "a1");
        assert!(!card.exclude_from_draw);
    }
}
