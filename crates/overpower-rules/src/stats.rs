// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use overpower_catalog::CardCatalog;
use overpower_model::{CardType, CatalogCard, CharacterStats, PowerType, Stat};

use crate::input::copies;
use crate::resolve::{resolve, ResolvedDeck};
use crate::threat::threat_of;
use crate::{DeckInput, DeckRules};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconTotals {
    pub energy: u32,
    pub combat: u32,
    pub brute_force: u32,
    pub intelligence: u32,
}

impl IconTotals {
    fn add(&mut self, stat: Stat, count: u32) {
        let slot = match stat {
            Stat::Energy => &mut self.energy,
            Stat::Combat => &mut self.combat,
            Stat::BruteForce => &mut self.brute_force,
            Stat::Intelligence => &mut self.intelligence,
            _ => return,
        };
        *slot = slot.saturating_add(count);
    }

    #[must_use]
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Energy => self.energy,
            Stat::Combat => self.combat,
            Stat::BruteForce => self.brute_force,
            Stat::Intelligence => self.intelligence,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckStatistics {
    pub total_cards: u32,
    pub draw_pile_cards: u32,
    pub character_count: u32,
    pub mission_count: u32,
    pub location_count: u32,
    pub event_count: u32,
    pub unique_types: usize,
    pub type_breakdown: BTreeMap<CardType, u32>,
    /// Per-stat maximum across the deck's characters.
    pub max_stats: CharacterStats,
    pub icon_totals: IconTotals,
    pub total_threat: u32,
    /// Draw-pile cards that can actually be shuffled into a hand.
    pub playable_for_draw: u32,
    pub can_draw_hand: bool,
}

#[must_use]
pub fn deck_statistics(
    input: &DeckInput<'_>,
    catalog: &dyn CardCatalog,
    rules: &DeckRules,
) -> DeckStatistics {
    let resolved = resolve(input, catalog);
    let mut type_breakdown = BTreeMap::new();
    for card in input.cards {
        let slot = type_breakdown.entry(card.card_type).or_insert(0u32);
        *slot = slot.saturating_add(card.quantity);
    }
    let playable_for_draw = copies(
        input
            .cards
            .iter()
            .filter(|c| c.card_type.is_draw_pile() && !c.exclude_from_draw),
    );
    DeckStatistics {
        total_cards: input.total_cards(),
        draw_pile_cards: input.draw_pile_count(),
        character_count: input.count_of(CardType::Character),
        mission_count: input.count_of(CardType::Mission),
        location_count: input.count_of(CardType::Location),
        event_count: input.count_of(CardType::Event),
        unique_types: type_breakdown.len(),
        type_breakdown,
        max_stats: max_stats(&resolved),
        icon_totals: icon_totals(&resolved),
        total_threat: threat_of(&resolved, input.reserve_character, rules),
        playable_for_draw,
        can_draw_hand: playable_for_draw >= rules.min_playable_for_draw,
    }
}

pub(crate) fn max_stats(resolved: &ResolvedDeck<'_>) -> CharacterStats {
    resolved
        .characters()
        .fold(CharacterStats::default(), |acc, (c, _)| acc.max_with(&c.stats))
}

fn icons_of(card: &CatalogCard) -> Vec<Stat> {
    match card {
        CatalogCard::Power(power) => match power.power_type {
            PowerType::Single(stat) => vec![stat],
            PowerType::MultiPower => Stat::ALL.to_vec(),
            PowerType::AnyPower => Vec::new(),
        },
        CatalogCard::Teamwork(teamwork) => {
            if teamwork.to_use.contains("Any-Power") {
                Vec::new()
            } else {
                Stat::mentioned_in(&teamwork.to_use)
            }
        }
        CatalogCard::AllyUniverse(ally) => ally
            .stat_type_to_use
            .as_deref()
            .and_then(|text| Stat::mentioned_in(text).into_iter().next())
            .into_iter()
            .collect(),
        CatalogCard::Special(_) | CatalogCard::Aspect(_) => card.printed_icons(),
        _ => Vec::new(),
    }
}

pub(crate) fn icon_totals(resolved: &ResolvedDeck<'_>) -> IconTotals {
    let mut totals = IconTotals::default();
    for item in &resolved.cards {
        for stat in icons_of(item.card) {
            totals.add(stat, item.entry.quantity);
        }
    }
    totals
}
