// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Overpower card and deck model.
//!
//! ```compile_fail
//! use overpower_model::Stat;
//!
//! fn exhaustive_match(s: Stat) -> &'static str {
//!     match s {
//!         Stat::Energy => "e",
//!         Stat::Combat => "c",
//!         Stat::BruteForce => "b",
//!         Stat::Intelligence => "i",
//!     }
//! }
//! ```

mod card;
mod card_type;
mod deck;
mod error;
mod stats;

pub use card::{
    AdvancedUniverseCard, AllyUniverseCard, AspectCard, BasicUniverseCard, CatalogCard,
    CharacterCard, EventCard, LocationCard, MissionCard, PowerCard, SpecialCard, TeamworkCard,
    TrainingCard, ANY_CHARACTER, ANY_MISSION,
};
pub use card_type::CardType;
pub use deck::{Deck, DeckCard, DECK_CARD_QUANTITY_MAX, DECK_NAME_MAX_LEN};
pub use error::ValidationError;
pub use stats::{CharacterStats, PowerType, Stat};

pub const CRATE_NAME: &str = "overpower-model";
