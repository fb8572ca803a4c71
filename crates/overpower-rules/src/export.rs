// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use overpower_catalog::CardCatalog;
use overpower_model::{
    CardType, CatalogCard, Deck, DeckCard, ValidationError, DECK_CARD_QUANTITY_MAX,
};

use crate::limits::UNKNOWN_CARD_NAME;
use crate::report::{DeckViolation, RuleId, ValidationReport};
use crate::resolve::resolve;
use crate::stats::{icon_totals, max_stats};
use crate::threat::threat_of;
use crate::{validate_deck, DeckInput, DeckRules};

const UNKNOWN_CHARACTER: &str = "Unknown Character";
const UNKNOWN_MISSION_SET: &str = "Unknown Mission Set";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    pub exported_by: String,
    pub exported_at: DateTime<Utc>,
}

impl ExportContext {
    #[must_use]
    pub fn now(exported_by: &str) -> Self {
        Self {
            exported_by: exported_by.to_string(),
            exported_at: Utc::now(),
        }
    }
}

/// Card names per export category; each name repeats once per copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportCards {
    pub characters: Vec<String>,
    pub special_cards: BTreeMap<String, Vec<String>>,
    pub locations: Vec<String>,
    pub missions: BTreeMap<String, Vec<String>>,
    pub events: BTreeMap<String, Vec<String>>,
    pub aspects: Vec<String>,
    pub advanced_universe: BTreeMap<String, Vec<String>>,
    pub teamwork: Vec<String>,
    pub allies: Vec<String>,
    pub training: Vec<String>,
    pub basic_universe: Vec<String>,
    pub power_cards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckExport {
    pub name: String,
    pub description: Option<String>,
    /// Draw-pile size.
    pub total_cards: u32,
    pub max_energy: u32,
    pub max_combat: u32,
    pub max_brute_force: u32,
    pub max_intelligence: u32,
    pub total_energy_icons: u32,
    pub total_combat_icons: u32,
    pub total_brute_force_icons: u32,
    pub total_intelligence_icons: u32,
    pub total_threat: u32,
    pub legal: bool,
    pub limited: bool,
    pub export_timestamp: DateTime<Utc>,
    pub exported_by: String,
    pub reserve_character: Option<String>,
    pub cataclysm_special: Option<String>,
    pub assist_special: Option<String>,
    pub ambush_special: Option<String>,
    pub cards: ExportCards,
}

/// Copies written per entry. Decks passing `Deck::validate_shape` never
/// exceed the cap, so only malformed decks are truncated.
const fn listed_copies(quantity: u32) -> usize {
    if quantity > DECK_CARD_QUANTITY_MAX {
        DECK_CARD_QUANTITY_MAX as usize
    } else {
        quantity as usize
    }
}

fn repeated(name: &str, quantity: u32) -> impl Iterator<Item = String> + '_ {
    std::iter::repeat(name).take(listed_copies(quantity)).map(str::to_string)
}

fn group_key(card: &CatalogCard) -> String {
    match card {
        CatalogCard::Special(c) => c.character_name.clone(),
        CatalogCard::AdvancedUniverse(c) => c.character.clone(),
        other => other
            .mission_set()
            .map_or_else(|| UNKNOWN_MISSION_SET.to_string(), str::to_string),
    }
}

fn grouped_fallback(card_type: CardType) -> &'static str {
    match card_type {
        CardType::Mission | CardType::Event => UNKNOWN_MISSION_SET,
        _ => UNKNOWN_CHARACTER,
    }
}

/// Builds the portable export document for a deck.
#[must_use]
pub fn export_deck(
    deck: &Deck,
    catalog: &dyn CardCatalog,
    rules: &DeckRules,
    context: &ExportContext,
) -> DeckExport {
    let input = DeckInput::from(deck);
    let report = validate_deck(&input, catalog, rules);
    let resolved = resolve(&input, catalog);
    let max = max_stats(&resolved);
    let icons = icon_totals(&resolved);

    let mut cards = ExportCards::default();
    let mut powers: Vec<(u32, u8, String)> = Vec::new();
    for entry in &deck.cards {
        let card = catalog.get(entry.card_type, &entry.card_id);
        let name = card.map_or_else(|| UNKNOWN_CARD_NAME.to_string(), CatalogCard::display_name);
        let quantity = entry.quantity;
        let grouped = |groups: &mut BTreeMap<String, Vec<String>>| {
            let key = card.map_or_else(|| grouped_fallback(entry.card_type).to_string(), group_key);
            groups.entry(key).or_default().extend(repeated(&name, quantity));
        };
        match entry.card_type {
            CardType::Character => cards.characters.extend(repeated(&name, quantity)),
            CardType::Special => grouped(&mut cards.special_cards),
            CardType::Location => cards.locations.extend(repeated(&name, quantity)),
            CardType::Mission => grouped(&mut cards.missions),
            CardType::Event => grouped(&mut cards.events),
            CardType::Aspect => cards.aspects.extend(repeated(&name, quantity)),
            CardType::AdvancedUniverse => grouped(&mut cards.advanced_universe),
            CardType::Teamwork => cards.teamwork.extend(repeated(&name, quantity)),
            CardType::AllyUniverse => cards.allies.extend(repeated(&name, quantity)),
            CardType::Training => cards.training.extend(repeated(&name, quantity)),
            CardType::BasicUniverse => cards.basic_universe.extend(repeated(&name, quantity)),
            CardType::Power => {
                let (value, rank) = match card {
                    Some(CatalogCard::Power(p)) => (p.value, p.power_type.sort_rank()),
                    _ => (u32::MAX, u8::MAX),
                };
                for _ in 0..listed_copies(quantity) {
                    powers.push((value, rank, name.clone()));
                }
            }
        }
    }
    powers.sort_by_key(|(value, rank, _)| (*value, *rank));
    cards.power_cards = powers.into_iter().map(|(_, _, name)| name).collect();

    let reserve_character = deck.reserve_character.as_deref().and_then(|id| {
        deck.cards
            .iter()
            .find(|c| c.card_type == CardType::Character && c.card_id == id)
            .map(|c| {
                catalog
                    .get(c.card_type, &c.card_id)
                    .map_or_else(|| UNKNOWN_CARD_NAME.to_string(), CatalogCard::display_name)
            })
    });

    let mut cataclysm_special = None;
    let mut assist_special = None;
    let mut ambush_special = None;
    for item in resolved.of_type(CardType::Special) {
        let Some(special) = item.card.as_special() else {
            continue;
        };
        if special.is_cataclysm && cataclysm_special.is_none() {
            cataclysm_special = Some(special.name.clone());
        }
        if special.is_assist && assist_special.is_none() {
            assist_special = Some(special.name.clone());
        }
        if special.is_ambush && ambush_special.is_none() {
            ambush_special = Some(special.name.clone());
        }
    }

    DeckExport {
        name: deck.name.clone(),
        description: deck.description.clone(),
        total_cards: input.draw_pile_count(),
        max_energy: max.energy,
        max_combat: max.combat,
        max_brute_force: max.brute_force,
        max_intelligence: max.intelligence,
        total_energy_icons: icons.energy,
        total_combat_icons: icons.combat,
        total_brute_force_icons: icons.brute_force,
        total_intelligence_icons: icons.intelligence,
        total_threat: threat_of(&resolved, input.reserve_character, rules),
        legal: report.is_legal(),
        limited: deck.is_limited,
        export_timestamp: context.exported_at,
        exported_by: context.exported_by.clone(),
        reserve_character,
        cataclysm_special,
        assist_special,
        ambush_special,
        cards,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportError {
    Parse(String),
    MissingCards,
    NoCards,
    Invalid(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid JSON format: {message}"),
            Self::MissingCards => f.write_str("invalid import format: missing \"cards\" section"),
            Self::NoCards => f.write_str("no cards found in import data"),
            Self::Invalid(message) => write!(f, "invalid import data: {message}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<ValidationError> for ImportError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value.0)
    }
}

/// Import input: an export document or any JSON object with a `cards`
/// section laid out the same way. Unknown top-level fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reserve_character: Option<String>,
    #[serde(default)]
    pub cards: Option<Value>,
}

pub fn parse_import_json(raw: &str) -> Result<ImportDocument, ImportError> {
    serde_json::from_str(raw).map_err(|e| ImportError::Parse(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cards: Vec<DeckCard>,
    /// Catalog id of the reserve character, when its name resolved.
    pub reserve_character: Option<String>,
    /// Names that matched no catalog card of their category.
    pub unresolved: Vec<String>,
}

impl ImportOutcome {
    /// Turns the outcome into a deck, falling back to `default_name`.
    #[must_use]
    pub fn into_deck(self, id: &str, default_name: &str) -> Deck {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_name.to_string());
        let mut deck = Deck::new(id, &name);
        deck.description = self.description;
        deck.cards = self.cards;
        deck.reserve_character = self.reserve_character;
        deck
    }
}

const FLAT_CATEGORIES: [(&str, CardType); 8] = [
    ("characters", CardType::Character),
    ("locations", CardType::Location),
    ("aspects", CardType::Aspect),
    ("teamwork", CardType::Teamwork),
    ("allies", CardType::AllyUniverse),
    ("training", CardType::Training),
    ("basic_universe", CardType::BasicUniverse),
    ("power_cards", CardType::Power),
];

const GROUPED_CATEGORIES: [(&str, CardType); 4] = [
    ("special_cards", CardType::Special),
    ("missions", CardType::Mission),
    ("events", CardType::Event),
    ("advanced_universe", CardType::AdvancedUniverse),
];

fn names_in(value: &Value) -> impl Iterator<Item = &str> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn extract_names(cards: &Value) -> Vec<(CardType, &str)> {
    let mut out = Vec::new();
    for (key, card_type) in FLAT_CATEGORIES {
        if let Some(value) = cards.get(key) {
            out.extend(names_in(value).map(|name| (card_type, name)));
        }
    }
    for (key, card_type) in GROUPED_CATEGORIES {
        match cards.get(key) {
            Some(Value::Object(groups)) => {
                for group in groups.values() {
                    out.extend(names_in(group).map(|name| (card_type, name)));
                }
            }
            Some(flat @ Value::Array(_)) => {
                out.extend(names_in(flat).map(|name| (card_type, name)));
            }
            _ => {}
        }
    }
    out
}

fn find_card<'a>(
    catalog: &'a dyn CardCatalog,
    card_type: CardType,
    name: &str,
) -> Option<&'a CatalogCard> {
    if let Some(card) = catalog.find_by_name(card_type, name) {
        return Some(card);
    }
    // Teamwork names may carry their follow-up types: "6 Combat - Brute Force + Intelligence".
    if card_type == CardType::Teamwork {
        let (base, followup) = name.split_once(" - ")?;
        return catalog.list(CardType::Teamwork).into_iter().find(|card| match card {
            CatalogCard::Teamwork(t) => {
                t.to_use.trim() == base.trim()
                    && t.followup_attack_types.as_deref().map(str::trim) == Some(followup.trim())
            }
            _ => false,
        });
    }
    None
}

/// Resolves exported names back to catalog ids, merging repeats into quantities.
pub fn import_deck(
    document: &ImportDocument,
    catalog: &dyn CardCatalog,
) -> Result<ImportOutcome, ImportError> {
    let cards = match &document.cards {
        Some(value @ Value::Object(_)) => value,
        _ => return Err(ImportError::MissingCards),
    };
    let names = extract_names(cards);
    if names.is_empty() {
        return Err(ImportError::NoCards);
    }

    let mut scratch = Deck::new("import", "import");
    let mut unresolved = Vec::new();
    for (card_type, name) in names {
        match find_card(catalog, card_type, name) {
            Some(card) => scratch.add_card(card_type, card.id(), 1, None)?,
            None => unresolved.push(name.to_string()),
        }
    }

    let reserve_character = document.reserve_character.as_deref().and_then(|name| {
        let card = catalog.find_by_name(CardType::Character, name)?;
        scratch
            .cards
            .iter()
            .any(|c| c.card_type == CardType::Character && c.card_id == card.id())
            .then(|| card.id().to_string())
    });
    tracing::debug!(
        cards = scratch.cards.len(),
        unresolved = unresolved.len(),
        "deck import resolved"
    );
    Ok(ImportOutcome {
        name: document.name.clone(),
        description: document.description.clone(),
        cards: scratch.cards,
        reserve_character,
        unresolved,
    })
}

/// Violations that should stop an import. Draw-pile size and threat are
/// left for the player to adjust afterwards.
#[must_use]
pub fn import_blockers(report: &ValidationReport) -> Vec<&DeckViolation> {
    report
        .errors()
        .filter(|v| !matches!(v.rule, RuleId::DeckSize | RuleId::ThreatLevel))
        .collect()
}
