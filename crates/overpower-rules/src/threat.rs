// SPDX-License-Identifier: Apache-2.0

use overpower_catalog::CardCatalog;
use overpower_model::{CardType, CatalogCard};

use crate::resolve::{resolve, ResolvedDeck};
use crate::{DeckInput, DeckRules};

/// Sum of character and location threat, with reserve adjustments applied.
#[must_use]
pub fn total_threat(input: &DeckInput<'_>, catalog: &dyn CardCatalog, rules: &DeckRules) -> u32 {
    let resolved = resolve(input, catalog);
    threat_of(&resolved, input.reserve_character, rules)
}

pub(crate) fn threat_of(
    resolved: &ResolvedDeck<'_>,
    reserve_character: Option<&str>,
    rules: &DeckRules,
) -> u32 {
    let mut total: u32 = 0;
    for (character, entry) in resolved.characters() {
        let mut threat = character.threat_level.saturating_mul(entry.quantity);
        if reserve_character == Some(entry.card_id.as_str()) {
            if let Some(reserve_threat) = rules.reserve_threat_for(&character.name) {
                threat = threat
                    .saturating_sub(character.threat_level)
                    .saturating_add(reserve_threat);
            }
        }
        total = total.saturating_add(threat);
    }
    for resolved_card in resolved.of_type(CardType::Location) {
        if let CatalogCard::Location(location) = resolved_card.card {
            total = total.saturating_add(
                location
                    .threat_level
                    .saturating_mul(resolved_card.entry.quantity),
            );
        }
    }
    total
}
