// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{CardType, CharacterStats, PowerType, Stat};

/// Special cards playable by any character carry this character name.
pub const ANY_CHARACTER: &str = "Any Character";
/// Events playable with any mission set carry this mission set.
pub const ANY_MISSION: &str = "Any-Mission";

fn default_any_character() -> String {
    ANY_CHARACTER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCard {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub stats: CharacterStats,
    pub threat_level: u32,
    #[serde(default)]
    pub special_abilities: Option<String>,
    #[serde(default)]
    pub universe: Option<String>,
    #[serde(default)]
    pub alternate_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialCard {
    pub id: String,
    pub name: String,
    #[serde(default = "default_any_character")]
    pub character_name: String,
    #[serde(default)]
    pub card_effect: Option<String>,
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub is_cataclysm: bool,
    #[serde(default)]
    pub is_assist: bool,
    #[serde(default)]
    pub is_ambush: bool,
    #[serde(default)]
    pub one_per_deck: bool,
    #[serde(default)]
    pub universe: Option<String>,
    #[serde(default)]
    pub alternate_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerCard {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub power_type: PowerType,
    pub value: u32,
    #[serde(default)]
    pub one_per_deck: bool,
    #[serde(default)]
    pub alternate_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionCard {
    pub id: String,
    pub name: String,
    pub mission_set: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventCard {
    pub id: String,
    pub name: String,
    pub mission_set: String,
    #[serde(default)]
    pub game_effect: Option<String>,
    #[serde(default)]
    pub one_per_deck: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub threat_level: u32,
    #[serde(default)]
    pub special_ability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AspectCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub card_effect: Option<String>,
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub is_fortification: bool,
    #[serde(default)]
    pub one_per_deck: bool,
    #[serde(default)]
    pub universe: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvancedUniverseCard {
    pub id: String,
    pub name: String,
    pub character: String,
    #[serde(default)]
    pub card_effect: Option<String>,
    #[serde(default)]
    pub to_use: Option<String>,
    #[serde(default)]
    pub one_per_deck: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamworkCard {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub to_use: String,
    #[serde(default)]
    pub acts_as: Option<String>,
    #[serde(default)]
    pub followup_attack_types: Option<String>,
    #[serde(default)]
    pub first_attack_bonus: Option<String>,
    #[serde(default)]
    pub second_attack_bonus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllyUniverseCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stat_to_use: Option<String>,
    #[serde(default)]
    pub stat_type_to_use: Option<String>,
    #[serde(default)]
    pub attack_value: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub card_text: Option<String>,
    #[serde(default)]
    pub to_use: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub type_1: Option<String>,
    #[serde(default)]
    pub type_2: Option<String>,
    #[serde(default)]
    pub value_to_use: Option<String>,
    #[serde(default)]
    pub bonus: Option<String>,
    #[serde(default)]
    pub to_use: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicUniverseCard {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub stat_type: Option<String>,
    #[serde(default)]
    pub value_to_use: Option<String>,
    #[serde(default)]
    pub bonus: Option<String>,
    #[serde(default)]
    pub to_use: Option<String>,
}

/// Any card the catalog can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "card_type", rename_all = "snake_case")]
pub enum CatalogCard {
    Character(CharacterCard),
    Special(SpecialCard),
    Power(PowerCard),
    Mission(MissionCard),
    Event(EventCard),
    Location(LocationCard),
    Aspect(AspectCard),
    AdvancedUniverse(AdvancedUniverseCard),
    Teamwork(TeamworkCard),
    AllyUniverse(AllyUniverseCard),
    Training(TrainingCard),
    BasicUniverse(BasicUniverseCard),
}

impl CatalogCard {
    #[must_use]
    pub const fn card_type(&self) -> CardType {
        match self {
            Self::Character(_) => CardType::Character,
            Self::Special(_) => CardType::Special,
            Self::Power(_) => CardType::Power,
            Self::Mission(_) => CardType::Mission,
            Self::Event(_) => CardType::Event,
            Self::Location(_) => CardType::Location,
            Self::Aspect(_) => CardType::Aspect,
            Self::AdvancedUniverse(_) => CardType::AdvancedUniverse,
            Self::Teamwork(_) => CardType::Teamwork,
            Self::AllyUniverse(_) => CardType::AllyUniverse,
            Self::Training(_) => CardType::Training,
            Self::BasicUniverse(_) => CardType::BasicUniverse,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Character(c) => &c.id,
            Self::Special(c) => &c.id,
            Self::Power(c) => &c.id,
            Self::Mission(c) => &c.id,
            Self::Event(c) => &c.id,
            Self::Location(c) => &c.id,
            Self::Aspect(c) => &c.id,
            Self::AdvancedUniverse(c) => &c.id,
            Self::Teamwork(c) => &c.id,
            Self::AllyUniverse(c) => &c.id,
            Self::Training(c) => &c.id,
            Self::BasicUniverse(c) => &c.id,
        }
    }

    /// Name shown to players and used by deck export/import.
    ///
    /// Power cards without a stored name render as `"{value} - {power_type}"`;
    /// unnamed teamwork cards render as their `to_use` text.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Character(c) => c.name.clone(),
            Self::Special(c) => c.name.clone(),
            Self::Power(c) => c
                .name
                .clone()
                .unwrap_or_else(|| format!("{} - {}", c.value, c.power_type)),
            Self::Mission(c) => c.name.clone(),
            Self::Event(c) => c.name.clone(),
            Self::Location(c) => c.name.clone(),
            Self::Aspect(c) => c.name.clone(),
            Self::AdvancedUniverse(c) => c.name.clone(),
            Self::Teamwork(c) => c.name.clone().unwrap_or_else(|| c.to_use.clone()),
            Self::AllyUniverse(c) => c.name.clone(),
            Self::Training(c) => c.name.clone(),
            Self::BasicUniverse(c) => c.name.clone(),
        }
    }

    #[must_use]
    pub fn is_one_per_deck(&self) -> bool {
        match self {
            Self::Special(c) => c.one_per_deck,
            Self::Power(c) => c.one_per_deck,
            Self::Event(c) => c.one_per_deck,
            Self::Aspect(c) => c.one_per_deck,
            Self::AdvancedUniverse(c) => c.one_per_deck,
            _ => false,
        }
    }

    /// Stat requirement text of universe-family cards, e.g. `"6 Combat"`.
    #[must_use]
    pub fn to_use(&self) -> Option<&str> {
        match self {
            Self::AdvancedUniverse(c) => c.to_use.as_deref(),
            Self::Teamwork(c) => Some(c.to_use.as_str()),
            Self::AllyUniverse(c) => c.to_use.as_deref(),
            Self::Training(c) => c.to_use.as_deref(),
            Self::BasicUniverse(c) => c.to_use.as_deref(),
            _ => None,
        }
    }

    /// Printed stat icons of special and aspect cards, filtered to the four stats.
    #[must_use]
    pub fn printed_icons(&self) -> Vec<Stat> {
        let raw = match self {
            Self::Special(c) => &c.icons,
            Self::Aspect(c) => &c.icons,
            _ => return Vec::new(),
        };
        raw.iter().filter_map(|icon| Stat::from_name(icon)).collect()
    }

    #[must_use]
    pub fn as_character(&self) -> Option<&CharacterCard> {
        match self {
            Self::Character(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_special(&self) -> Option<&SpecialCard> {
        match self {
            Self::Special(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn mission_set(&self) -> Option<&str> {
        match self {
            Self::Mission(c) => Some(c.mission_set.as_str()),
            Self::Event(c) => Some(c.mission_set.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_card_display_name_falls_back_to_value_and_type() {
        let card = CatalogCard::Power(PowerCard {
            id: "p5e".to_string(),
            name: None,
            power_type: PowerType::Single(Stat::Energy),
            value: 5,
            one_per_deck: false,
            alternate_images: Vec::new(),
        });
        assert_eq!(card.display_name(), "5 - Energy");
        assert_eq!(card.card_type(), CardType::Power);
    }

    #[test]
    fn special_card_defaults_to_any_character() {
        let card: SpecialCard =
            serde_json::from_str(r#"{"id":"s1","name":"Grim Resolve","icons":["Combat","Leadership"]}"#)
                .expect("decode");
        assert_eq!(card.character_name, ANY_CHARACTER);
        let wrapped = CatalogCard::Special(card);
        assert_eq!(wrapped.printed_icons(), vec![Stat::Combat]);
    }

    #[test]
    fn character_stats_flatten_into_record() {
        let card: CharacterCard = serde_json::from_str(
            r#"{"id":"c1","name":"Tarzan","energy":6,"combat":7,"brute_force":6,"intelligence":3,"threat_level":20}"#,
        )
        .expect("decode");
        assert_eq!(card.stats.max(), 7);
    }

    #[test]
    fn unknown_record_fields_are_rejected() {
        let err = serde_json::from_str::<MissionCard>(
            r#"{"id":"m1","name":"Shadows","mission_set":"King of the Jungle","rarity":"rare"}"#,
        );
        assert!(err.is_err());
    }
}
