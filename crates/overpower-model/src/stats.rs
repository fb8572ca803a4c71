// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::ValidationError;

/// One of the four character stats; also the four icon kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Stat {
    Energy,
    Combat,
    #[serde(rename = "Brute Force")]
    BruteForce,
    Intelligence,
}

impl Stat {
    pub const ALL: [Stat; 4] = [
        Self::Energy,
        Self::Combat,
        Self::BruteForce,
        Self::Intelligence,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Combat => "Combat",
            Self::BruteForce => "Brute Force",
            Self::Intelligence => "Intelligence",
        }
    }

    #[must_use]
    pub fn from_name(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(trimmed))
    }

    /// Stats named anywhere in `text`, case-insensitively, in canonical order.
    #[must_use]
    pub fn mentioned_in(text: &str) -> Vec<Self> {
        let lowered = text.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .filter(|s| lowered.contains(&s.as_str().to_ascii_lowercase()))
            .collect()
    }
}

impl Display for Stat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PowerType {
    Single(Stat),
    MultiPower,
    AnyPower,
}

impl PowerType {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if let Some(stat) = Stat::from_name(trimmed) {
            return Ok(Self::Single(stat));
        }
        let squashed: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match squashed.as_str() {
            "multipower" => Ok(Self::MultiPower),
            "anypower" => Ok(Self::AnyPower),
            _ => Err(ValidationError(format!("unknown power type `{trimmed}`"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single(stat) => stat.as_str(),
            Self::MultiPower => "Multi Power",
            Self::AnyPower => "Any-Power",
        }
    }

    /// Ordering used when listing power cards of equal value.
    #[must_use]
    pub const fn sort_rank(self) -> u8 {
        match self {
            Self::Single(Stat::Energy) => 1,
            Self::Single(Stat::Combat) => 2,
            Self::Single(Stat::BruteForce) => 3,
            Self::Single(Stat::Intelligence) => 4,
            Self::MultiPower => 5,
            Self::AnyPower => 6,
        }
    }

    /// Character stat a card of this power type is played from.
    #[must_use]
    pub fn usable_stat(self, stats: &CharacterStats) -> u32 {
        match self {
            Self::Single(stat) => stats.get(stat),
            Self::MultiPower | Self::AnyPower => stats.max(),
        }
    }
}

impl Display for PowerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PowerType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PowerType> for String {
    fn from(value: PowerType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    #[serde(default)]
    pub energy: u32,
    #[serde(default)]
    pub combat: u32,
    #[serde(default)]
    pub brute_force: u32,
    #[serde(default)]
    pub intelligence: u32,
}

impl CharacterStats {
    #[must_use]
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Energy => self.energy,
            Stat::Combat => self.combat,
            Stat::BruteForce => self.brute_force,
            Stat::Intelligence => self.intelligence,
        }
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.energy
            .max(self.combat)
            .max(self.brute_force)
            .max(self.intelligence)
    }

    /// Per-stat maximum of two stat lines.
    #[must_use]
    pub fn max_with(&self, other: &Self) -> Self {
        Self {
            energy: self.energy.max(other.energy),
            combat: self.combat.max(other.combat),
            brute_force: self.brute_force.max(other.brute_force),
            intelligence: self.intelligence.max(other.intelligence),
        }
    }
}
