// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Character,
    Special,
    Power,
    Mission,
    Event,
    Location,
    Aspect,
    #[serde(alias = "advanced-universe")]
    AdvancedUniverse,
    Teamwork,
    #[serde(alias = "ally-universe")]
    AllyUniverse,
    Training,
    #[serde(alias = "basic-universe")]
    BasicUniverse,
}

impl CardType {
    pub const ALL: [CardType; 12] = [
        Self::Character,
        Self::Special,
        Self::Power,
        Self::Mission,
        Self::Event,
        Self::Location,
        Self::Aspect,
        Self::AdvancedUniverse,
        Self::Teamwork,
        Self::AllyUniverse,
        Self::Training,
        Self::BasicUniverse,
    ];

    /// Card types gated by a `to_use` stat requirement.
    pub const UNIVERSE: [CardType; 5] = [
        Self::BasicUniverse,
        Self::AdvancedUniverse,
        Self::Teamwork,
        Self::AllyUniverse,
        Self::Training,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Special => "special",
            Self::Power => "power",
            Self::Mission => "mission",
            Self::Event => "event",
            Self::Location => "location",
            Self::Aspect => "aspect",
            Self::AdvancedUniverse => "advanced_universe",
            Self::Teamwork => "teamwork",
            Self::AllyUniverse => "ally_universe",
            Self::Training => "training",
            Self::BasicUniverse => "basic_universe",
        }
    }

    #[must_use]
    pub const fn kebab_str(self) -> &'static str {
        match self {
            Self::AdvancedUniverse => "advanced-universe",
            Self::AllyUniverse => "ally-universe",
            Self::BasicUniverse => "basic-universe",
            other => other.as_str(),
        }
    }

    /// Characters, locations and missions sit beside the deck, never in the draw pile.
    #[must_use]
    pub const fn is_draw_pile(self) -> bool {
        !matches!(self, Self::Character | Self::Location | Self::Mission)
    }

    #[must_use]
    pub const fn is_universe(self) -> bool {
        matches!(
            self,
            Self::BasicUniverse
                | Self::AdvancedUniverse
                | Self::Teamwork
                | Self::AllyUniverse
                | Self::Training
        )
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ValidationError(format!("unknown card type `{}`", input.trim())))
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
