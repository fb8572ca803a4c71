// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use overpower_core::{canonical, resolve_config_file, ENV_OVERPOWER_RULES_PATH};

use crate::limits::{
    DEFAULT_HAND_SIZE, DEFAULT_MAX_LOCATIONS, DEFAULT_MAX_ONE_PER_DECK_COPIES,
    DEFAULT_MAX_TOTAL_THREAT, DEFAULT_MIN_DRAW_PILE, DEFAULT_MIN_DRAW_PILE_WITH_EVENTS,
    DEFAULT_MIN_PLAYABLE_FOR_DRAW, DEFAULT_REQUIRED_CHARACTERS, DEFAULT_REQUIRED_MISSIONS,
    RULES_SCHEMA_VERSION,
};

pub const DEFAULT_RULES_PATH: &str = "configs/rules.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesConfigError(pub String);

impl Display for RulesConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RulesConfigError {}

/// Threat a character carries while it is the deck's reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReserveThreatAdjustment {
    pub character_name: String,
    pub reserve_threat: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckRules {
    pub schema_version: u32,
    pub required_characters: u32,
    pub required_missions: u32,
    pub max_locations: u32,
    pub max_total_threat: u32,
    pub min_draw_pile: u32,
    pub min_draw_pile_with_events: u32,
    pub max_one_per_deck_copies: u32,
    pub hand_size: u32,
    pub min_playable_for_draw: u32,
    pub reserve_threat_adjustments: Vec<ReserveThreatAdjustment>,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            schema_version: RULES_SCHEMA_VERSION,
            required_characters: DEFAULT_REQUIRED_CHARACTERS,
            required_missions: DEFAULT_REQUIRED_MISSIONS,
            max_locations: DEFAULT_MAX_LOCATIONS,
            max_total_threat: DEFAULT_MAX_TOTAL_THREAT,
            min_draw_pile: DEFAULT_MIN_DRAW_PILE,
            min_draw_pile_with_events: DEFAULT_MIN_DRAW_PILE_WITH_EVENTS,
            max_one_per_deck_copies: DEFAULT_MAX_ONE_PER_DECK_COPIES,
            hand_size: DEFAULT_HAND_SIZE,
            min_playable_for_draw: DEFAULT_MIN_PLAYABLE_FOR_DRAW,
            reserve_threat_adjustments: vec![
                adjustment("Victory Harben", 20),
                adjustment("Carson of Venus", 19),
                adjustment("Morgan Le Fay", 20),
            ],
        }
    }
}

fn adjustment(character_name: &str, reserve_threat: u32) -> ReserveThreatAdjustment {
    ReserveThreatAdjustment {
        character_name: character_name.to_string(),
        reserve_threat,
    }
}

impl DeckRules {
    #[must_use]
    pub fn reserve_threat_for(&self, character_name: &str) -> Option<u32> {
        self.reserve_threat_adjustments
            .iter()
            .find(|a| a.character_name == character_name)
            .map(|a| a.reserve_threat)
    }

    /// Draw-pile minimum, which rises once any event is in the deck.
    #[must_use]
    pub const fn min_draw_pile_for(&self, has_events: bool) -> u32 {
        if has_events {
            self.min_draw_pile_with_events
        } else {
            self.min_draw_pile
        }
    }
}

pub fn validate_rules_config(rules: &DeckRules) -> Result<(), RulesConfigError> {
    if rules.schema_version != RULES_SCHEMA_VERSION {
        return Err(RulesConfigError(format!(
            "unsupported rules schema_version {} (expected {RULES_SCHEMA_VERSION})",
            rules.schema_version
        )));
    }
    let positive = [
        ("required_characters", rules.required_characters),
        ("required_missions", rules.required_missions),
        ("max_total_threat", rules.max_total_threat),
        ("min_draw_pile", rules.min_draw_pile),
        ("min_draw_pile_with_events", rules.min_draw_pile_with_events),
        ("max_one_per_deck_copies", rules.max_one_per_deck_copies),
        ("hand_size", rules.hand_size),
        ("min_playable_for_draw", rules.min_playable_for_draw),
    ];
    if let Some((field, _)) = positive.iter().find(|(_, value)| *value == 0) {
        return Err(RulesConfigError(format!("{field} must be > 0")));
    }
    if rules.min_draw_pile_with_events < rules.min_draw_pile {
        return Err(RulesConfigError(
            "min_draw_pile_with_events must be >= min_draw_pile".to_string(),
        ));
    }
    if rules.min_playable_for_draw < rules.hand_size {
        return Err(RulesConfigError(
            "min_playable_for_draw must be >= hand_size".to_string(),
        ));
    }
    let mut seen = std::collections::BTreeSet::new();
    for adjustment in &rules.reserve_threat_adjustments {
        if adjustment.character_name.trim().is_empty() {
            return Err(RulesConfigError(
                "reserve_threat_adjustments entries need a character_name".to_string(),
            ));
        }
        if !seen.insert(adjustment.character_name.as_str()) {
            return Err(RulesConfigError(format!(
                "duplicate reserve threat adjustment for `{}`",
                adjustment.character_name
            )));
        }
    }
    Ok(())
}

pub fn parse_rules_json(raw: &str) -> Result<DeckRules, RulesConfigError> {
    let rules: DeckRules = serde_json::from_str(raw)
        .map_err(|e| RulesConfigError(format!("parse rules config failed: {e}")))?;
    validate_rules_config(&rules)?;
    Ok(rules)
}

#[must_use]
pub fn rules_path(root: &Path) -> PathBuf {
    resolve_config_file(root, ENV_OVERPOWER_RULES_PATH, DEFAULT_RULES_PATH)
}

pub fn load_rules_file(path: &Path) -> Result<DeckRules, RulesConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        RulesConfigError(format!("read rules config {} failed: {e}", path.display()))
    })?;
    parse_rules_json(&raw)
}

/// Loads the workspace rules file, falling back to built-in defaults when
/// the default location holds no file. An explicit `OVERPOWER_RULES_PATH`
/// must exist.
pub fn load_rules_from_workspace(root: &Path) -> Result<DeckRules, RulesConfigError> {
    let path = rules_path(root);
    let explicit = std::env::var_os(ENV_OVERPOWER_RULES_PATH).is_some();
    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "no rules config found, using defaults");
        return Ok(DeckRules::default());
    }
    load_rules_file(&path)
}

pub fn canonical_rules_json(rules: &DeckRules) -> Result<String, RulesConfigError> {
    let bytes = canonical::stable_json_bytes(rules)
        .map_err(|e| RulesConfigError(format!("encode rules config failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| RulesConfigError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let rules = DeckRules::default();
        validate_rules_config(&rules).expect("defaults are valid");
        assert_eq!(rules.reserve_threat_for("Carson of Venus"), Some(19));
        assert_eq!(rules.reserve_threat_for("Tarzan"), None);
        assert_eq!(rules.min_draw_pile_for(true), 56);
        assert_eq!(rules.min_draw_pile_for(false), 51);
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let rules = parse_rules_json(r#"{"max_total_threat": 80}"#).expect("parse");
        assert_eq!(rules.max_total_threat, 80);
        assert_eq!(rules.required_characters, 4);
    }

    #[test]
    fn inconsistent_documents_are_rejected() {
        let err = parse_rules_json(r#"{"min_draw_pile": 60}"#).expect_err("invalid");
        assert_eq!(
            err.0,
            "min_draw_pile_with_events must be >= min_draw_pile"
        );
        let err = parse_rules_json(r#"{"hand_size": 0}"#).expect_err("invalid");
        assert_eq!(err.0, "hand_size must be > 0");
        assert!(parse_rules_json(r#"{"deck_colour": "red"}"#).is_err());
        assert!(parse_rules_json(r#"{"schema_version": 2}"#).is_err());
    }

    #[test]
    fn canonical_json_sorts_keys() {
        let encoded = canonical_rules_json(&DeckRules::default()).expect("encode");
        assert!(encoded.starts_with(r#"{"hand_size":8,"max_locations":1"#));
    }
}
