// SPDX-License-Identifier: Apache-2.0

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use overpower_catalog::CardCatalog;
use overpower_model::{CardType, CatalogCard, CharacterStats, PowerType, ANY_CHARACTER, ANY_MISSION};

use crate::limits::ANGRY_MOB_PREFIX;
use crate::report::{DeckViolation, RuleId, ValidationOutcome, ValidationReport};
use crate::resolve::{resolve, ResolvedDeck};
use crate::threat::threat_of;
use crate::{DeckInput, DeckRules};

#[derive(Debug, Clone, Copy)]
enum ExclusiveClass {
    Assist,
    Ambush,
    Cataclysm,
    Fortification,
}

impl ExclusiveClass {
    const ALL: [ExclusiveClass; 4] = [
        Self::Assist,
        Self::Ambush,
        Self::Cataclysm,
        Self::Fortification,
    ];

    const fn rule(self) -> RuleId {
        match self {
            Self::Assist => RuleId::AssistLimit,
            Self::Ambush => RuleId::AmbushLimit,
            Self::Cataclysm => RuleId::CataclysmLimit,
            Self::Fortification => RuleId::FortificationLimit,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Assist => "Assist special",
            Self::Ambush => "Ambush special",
            Self::Cataclysm => "Cataclysm special",
            Self::Fortification => "Fortification aspect",
        }
    }

    fn matches(self, card: &CatalogCard) -> bool {
        match (self, card) {
            (Self::Assist, CatalogCard::Special(s)) => s.is_assist,
            (Self::Ambush, CatalogCard::Special(s)) => s.is_ambush,
            (Self::Cataclysm, CatalogCard::Special(s)) => s.is_cataclysm,
            (Self::Fortification, CatalogCard::Aspect(a)) => a.is_fortification,
            _ => false,
        }
    }
}

/// Checks a deck against every construction rule and reports all findings.
#[must_use]
pub fn validate_deck(
    input: &DeckInput<'_>,
    catalog: &dyn CardCatalog,
    rules: &DeckRules,
) -> ValidationReport {
    let span = tracing::info_span!("validate_deck", deck_cards = input.cards.len());
    span.in_scope(|| {
        let resolved = resolve(input, catalog);
        let total_threat = threat_of(&resolved, input.reserve_character, rules);
        let draw_pile_count = resolved.draw_pile_count();

        let mut violations = Vec::new();
        check_counts(&resolved, rules, total_threat, &mut violations);
        check_deck_size(&resolved, rules, draw_pile_count, &mut violations);
        check_angry_mob(&resolved, &mut violations);
        check_specials(&resolved, &mut violations);
        check_events(&resolved, &mut violations);
        check_one_per_deck(&resolved, rules, &mut violations);
        let team = team_stats(&resolved);
        check_powers(&resolved, &team, &mut violations);
        check_universe(&resolved, &team, &mut violations);
        check_exclusive(&resolved, &mut violations);
        check_unknown(&resolved, &mut violations);
        check_reserve(input, &mut violations);

        let mut report = ValidationReport {
            outcome: ValidationOutcome::Legal,
            violations,
            total_threat,
            draw_pile_count,
        };
        report.outcome = if input.is_limited {
            ValidationOutcome::Limited
        } else if report.is_legal() {
            ValidationOutcome::Legal
        } else {
            ValidationOutcome::NotLegal
        };
        tracing::debug!(
            violations = report.violations.len(),
            outcome = report.outcome.label(),
            total_threat,
            "deck validated"
        );
        report
    })
}

fn check_counts(
    resolved: &ResolvedDeck<'_>,
    rules: &DeckRules,
    total_threat: u32,
    out: &mut Vec<DeckViolation>,
) {
    let characters = resolved.count_of(CardType::Character);
    if characters != rules.required_characters {
        out.push(DeckViolation::new(
            RuleId::CharacterCount,
            format!(
                "Deck must have exactly {} characters (found {characters})",
                rules.required_characters
            ),
            characters.to_string(),
        ));
    }

    let missions = resolved.count_of(CardType::Mission);
    if missions != rules.required_missions {
        out.push(DeckViolation::new(
            RuleId::MissionCount,
            format!(
                "Deck must have exactly {} mission cards (found {missions})",
                rules.required_missions
            ),
            missions.to_string(),
        ));
    } else {
        let sets = resolved.mission_sets();
        if sets.len() > 1 {
            let listed = sets.into_iter().collect::<Vec<_>>().join(", ");
            out.push(DeckViolation::new(
                RuleId::MissionSet,
                format!("All mission cards must be from the same mission set (found: {listed})"),
                listed,
            ));
        }
    }

    let locations = resolved.count_of(CardType::Location);
    if locations > rules.max_locations {
        let noun = if rules.max_locations == 1 {
            "location"
        } else {
            "locations"
        };
        out.push(DeckViolation::new(
            RuleId::LocationCount,
            format!(
                "Deck may have at most {} {noun} (found {locations})",
                rules.max_locations
            ),
            locations.to_string(),
        ));
    }

    if total_threat > rules.max_total_threat {
        out.push(DeckViolation::new(
            RuleId::ThreatLevel,
            format!(
                "Deck threat level must be {} or less (found {total_threat})",
                rules.max_total_threat
            ),
            total_threat.to_string(),
        ));
    }
}

fn check_deck_size(
    resolved: &ResolvedDeck<'_>,
    rules: &DeckRules,
    draw_pile_count: u32,
    out: &mut Vec<DeckViolation>,
) {
    let has_events = resolved.count_of(CardType::Event) > 0;
    let required = rules.min_draw_pile_for(has_events);
    if draw_pile_count < required {
        out.push(DeckViolation::new(
            RuleId::DeckSize,
            format!("Deck must have at least {required} cards in draw pile (found {draw_pile_count})"),
            format!("required={required} found={draw_pile_count} events={has_events}"),
        ));
    }
}

fn angry_mobs<'a>(resolved: &ResolvedDeck<'a>) -> Vec<(&'a str, u32)> {
    resolved
        .characters()
        .filter(|(c, _)| c.name.starts_with(ANGRY_MOB_PREFIX))
        .map(|(c, entry)| (c.name.as_str(), entry.quantity))
        .collect()
}

fn check_angry_mob(resolved: &ResolvedDeck<'_>, out: &mut Vec<DeckViolation>) {
    let mobs = angry_mobs(resolved);
    let copies = mobs
        .iter()
        .fold(0u32, |acc, (_, quantity)| acc.saturating_add(*quantity));
    if copies > 1 {
        let listed = mobs
            .iter()
            .map(|(name, quantity)| match quantity {
                1 => (*name).to_string(),
                n => format!("{name} x{n}"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push(DeckViolation::new(
            RuleId::AngryMobLimit,
            "Only one \"Angry Mob\" character is allowed per deck".to_string(),
            listed,
        ));
    }
}

fn check_specials(resolved: &ResolvedDeck<'_>, out: &mut Vec<DeckViolation>) {
    let team: BTreeSet<&str> = resolved.characters().map(|(c, _)| c.name.as_str()).collect();
    let mobs = angry_mobs(resolved);
    for item in resolved.of_type(CardType::Special) {
        let Some(special) = item.card.as_special() else {
            continue;
        };
        let required = special.character_name.as_str();
        if required == ANY_CHARACTER || required.is_empty() {
            continue;
        }
        let evidence = format!("special/{}", item.entry.card_id);
        if required.starts_with(ANGRY_MOB_PREFIX) {
            if mobs.is_empty() {
                out.push(DeckViolation::new(
                    RuleId::UnusableSpecial,
                    format!(
                        "\"{}\" requires an \"Angry Mob\" character in your team",
                        special.name
                    ),
                    evidence,
                ));
            } else if let Some((_, subtype)) = required.split_once(':') {
                let subtype = subtype.trim();
                if !mobs.iter().any(|(name, _)| name.contains(subtype)) {
                    out.push(DeckViolation::new(
                        RuleId::UnusableSpecial,
                        format!(
                            "\"{}\" requires an \"Angry Mob: {subtype}\" character in your team",
                            special.name
                        ),
                        evidence,
                    ));
                }
            }
        } else if !team.contains(required) {
            out.push(DeckViolation::new(
                RuleId::UnusableSpecial,
                format!(
                    "\"{}\" requires character \"{required}\" in your team",
                    special.name
                ),
                evidence,
            ));
        }
    }
}

fn check_events(resolved: &ResolvedDeck<'_>, out: &mut Vec<DeckViolation>) {
    let sets = resolved.mission_sets();
    if sets.is_empty() {
        return;
    }
    for item in resolved.of_type(CardType::Event) {
        let CatalogCard::Event(event) = item.card else {
            continue;
        };
        let required = event.mission_set.as_str();
        if required.is_empty() || required == ANY_MISSION || sets.contains(required) {
            continue;
        }
        out.push(DeckViolation::new(
            RuleId::UnusableEvent,
            format!(
                "\"{}\" requires mission set \"{required}\" in your deck",
                event.name
            ),
            format!("event/{}", item.entry.card_id),
        ));
    }
}

fn check_one_per_deck(resolved: &ResolvedDeck<'_>, rules: &DeckRules, out: &mut Vec<DeckViolation>) {
    let mut totals: BTreeMap<(CardType, &str), (u32, String)> = BTreeMap::new();
    for item in resolved.cards.iter().filter(|c| c.card.is_one_per_deck()) {
        let slot = totals
            .entry(item.entry.key())
            .or_insert_with(|| (0, item.card.display_name()));
        slot.0 = slot.0.saturating_add(item.entry.quantity);
    }
    for ((card_type, card_id), (count, name)) in totals {
        if count > rules.max_one_per_deck_copies {
            out.push(DeckViolation::new(
                RuleId::OnePerDeckViolation,
                format!("\"{name}\" is limited to one per deck (found {count})"),
                format!("{card_type}/{card_id}"),
            ));
        }
    }
}

fn team_stats(resolved: &ResolvedDeck<'_>) -> Vec<CharacterStats> {
    resolved.characters().map(|(c, _)| c.stats).collect()
}

fn team_can_use(team: &[CharacterStats], power_type: PowerType, value: u32) -> bool {
    team.iter().any(|stats| power_type.usable_stat(stats) >= value)
}

fn check_powers(resolved: &ResolvedDeck<'_>, team: &[CharacterStats], out: &mut Vec<DeckViolation>) {
    for item in resolved.of_type(CardType::Power) {
        let CatalogCard::Power(power) = item.card else {
            continue;
        };
        if power.value == 0 || team_can_use(team, power.power_type, power.value) {
            continue;
        }
        out.push(DeckViolation::new(
            RuleId::UnusablePower,
            format!(
                "\"{}\" (Power Card) requires a character with {}+ {}",
                item.card.display_name(),
                power.value,
                power.power_type
            ),
            format!("power/{}", item.entry.card_id),
        ));
    }
}

fn to_use_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(\d+)\s+(Energy|Combat|Brute Force|Intelligence|Any-Power)").ok())
        .as_ref()
}

/// Parses a universe card requirement such as `"6 Brute Force"`.
#[must_use]
pub fn parse_to_use(text: &str) -> Option<(u32, PowerType)> {
    let captures = to_use_pattern()?.captures(text)?;
    let value = captures.get(1)?.as_str().parse().ok()?;
    let power_type = PowerType::parse(captures.get(2)?.as_str()).ok()?;
    Some((value, power_type))
}

fn check_universe(resolved: &ResolvedDeck<'_>, team: &[CharacterStats], out: &mut Vec<DeckViolation>) {
    for item in resolved.cards.iter().filter(|c| c.entry.card_type.is_universe()) {
        let Some((value, power_type)) = item.card.to_use().and_then(parse_to_use) else {
            continue;
        };
        if team_can_use(team, power_type, value) {
            continue;
        }
        out.push(DeckViolation::new(
            RuleId::UnusableUniverse,
            format!(
                "\"{}\" (Universe Card) requires a character with {value}+ {power_type}",
                item.card.display_name()
            ),
            format!("{}/{}", item.entry.card_type, item.entry.card_id),
        ));
    }
}

fn check_exclusive(resolved: &ResolvedDeck<'_>, out: &mut Vec<DeckViolation>) {
    for class in ExclusiveClass::ALL {
        let mut names = BTreeMap::new();
        for item in resolved.cards.iter().filter(|c| class.matches(c.card)) {
            names
                .entry(item.entry.key())
                .or_insert_with(|| item.card.display_name());
        }
        if names.len() > 1 {
            let listed = names.into_values().collect::<Vec<_>>().join(", ");
            out.push(DeckViolation::new(
                class.rule(),
                format!(
                    "Deck may include only one {} card (found: {listed})",
                    class.label()
                ),
                listed,
            ));
        }
    }
}

fn check_unknown(resolved: &ResolvedDeck<'_>, out: &mut Vec<DeckViolation>) {
    for entry in &resolved.unknown {
        out.push(DeckViolation::new(
            RuleId::UnknownCard,
            format!(
                "Card \"{}\" of type {} is not in the catalog",
                entry.card_id, entry.card_type
            ),
            format!("{}/{}", entry.card_type, entry.card_id),
        ));
    }
}

fn check_reserve(input: &DeckInput<'_>, out: &mut Vec<DeckViolation>) {
    let Some(reserve) = input.reserve_character else {
        return;
    };
    let present = input
        .cards
        .iter()
        .any(|c| c.card_type == CardType::Character && c.card_id == reserve);
    if !present {
        out.push(DeckViolation::new(
            RuleId::InvalidReserve,
            format!("Reserve character \"{reserve}\" is not one of the deck's characters"),
            format!("character/{reserve}"),
        ));
    }
}
