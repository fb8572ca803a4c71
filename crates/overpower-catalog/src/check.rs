// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::collections::BTreeSet;

use overpower_model::{CardType, CatalogCard, ANY_CHARACTER, ANY_MISSION};

use crate::InMemoryCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogIssue {
    pub code: &'static str,
    pub severity: IssueSeverity,
    pub card_type: CardType,
    pub card_id: String,
    pub message: String,
}

/// Integrity problems a deck builder would trip over later.
///
/// Errors make cards unusable (blank names, zero-value power cards); warnings
/// flag cross-references no deck could ever satisfy.
#[must_use]
pub fn check_catalog(catalog: &InMemoryCatalog) -> Vec<CatalogIssue> {
    let character_names: BTreeSet<String> = catalog
        .iter()
        .filter_map(CatalogCard::as_character)
        .map(|c| c.name.trim().to_string())
        .collect();
    let mission_sets: BTreeSet<&str> = catalog
        .iter()
        .filter(|c| c.card_type() == CardType::Mission)
        .filter_map(CatalogCard::mission_set)
        .collect();

    let mut issues = Vec::new();
    for card in catalog.iter() {
        let mut push = |code: &'static str, severity: IssueSeverity, message: String| {
            issues.push(CatalogIssue {
                code,
                severity,
                card_type: card.card_type(),
                card_id: card.id().to_string(),
                message,
            });
        };

        if card.display_name().trim().is_empty() {
            push(
                "catalog.card.name.empty",
                IssueSeverity::Error,
                "card name must not be empty".to_string(),
            );
        }

        match card {
            CatalogCard::Power(power) if power.value == 0 => push(
                "catalog.power.value.zero",
                IssueSeverity::Error,
                "power card value must be > 0".to_string(),
            ),
            CatalogCard::Special(special) => {
                let wanted = special.character_name.trim();
                if wanted != ANY_CHARACTER
                    && !wanted.starts_with("Angry Mob")
                    && !character_names.contains(wanted)
                {
                    push(
                        "catalog.special.character.unknown",
                        IssueSeverity::Warning,
                        format!("special card names unknown character `{wanted}`"),
                    );
                }
            }
            CatalogCard::AdvancedUniverse(advanced) => {
                if !character_names.contains(advanced.character.trim()) {
                    push(
                        "catalog.advanced_universe.character.unknown",
                        IssueSeverity::Warning,
                        format!(
                            "advanced universe card names unknown character `{}`",
                            advanced.character
                        ),
                    );
                }
            }
            CatalogCard::Event(event) => {
                let set = event.mission_set.trim();
                if set != ANY_MISSION && !mission_sets.contains(set) {
                    push(
                        "catalog.event.mission_set.unknown",
                        IssueSeverity::Warning,
                        format!("event names unknown mission set `{set}`"),
                    );
                }
            }
            _ => {}
        }
    }
    sort_issues(&mut issues);
    issues
}

pub(crate) fn sort_issues(issues: &mut [CatalogIssue]) {
    issues.sort_by(|a, b| {
        (a.card_type, &a.card_id, a.code).cmp(&(b.card_type, &b.card_id, b.code))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogDocument;

    #[test]
    fn flags_broken_cross_references_and_values() {
        let catalog = CatalogDocument::parse_json(
            r#"{
              "characters": [{"id": "c1", "name": "Tarzan", "energy": 6, "combat": 7, "brute_force": 6, "intelligence": 3, "threat_level": 20}],
              "special_cards": [
                {"id": "s1", "name": "Lord of the Jungle", "character_name": "Tarzan"},
                {"id": "s2", "name": "Ride of Doom", "character_name": "Dracula"},
                {"id": "s3", "name": "Torches", "character_name": "Angry Mob: Middle Ages"}
              ],
              "power_cards": [{"id": "p0", "power_type": "Energy", "value": 0}],
              "missions": [{"id": "m1", "name": "Shadows", "mission_set": "King of the Jungle"}],
              "events": [
                {"id": "e1", "name": "Stampede", "mission_set": "King of the Jungle"},
                {"id": "e2", "name": "Eclipse", "mission_set": "Time Wars"},
                {"id": "e3", "name": "Wildcard", "mission_set": "Any-Mission"}
              ]
            }"#,
        )
        .and_then(CatalogDocument::into_catalog)
        .expect("catalog");

        let issues = check_catalog(&catalog);
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].code, "catalog.special.character.unknown");
        assert_eq!(issues[0].card_id, "s2");
        assert_eq!(issues[1].code, "catalog.power.value.zero");
        assert_eq!(issues[1].severity, IssueSeverity::Error);
        assert_eq!(issues[2].code, "catalog.event.mission_set.unknown");
        assert_eq!(issues[2].card_id, "e2");
    }
}
