// SPDX-License-Identifier: Apache-2.0

pub const RULES_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_REQUIRED_CHARACTERS: u32 = 4;
pub const DEFAULT_REQUIRED_MISSIONS: u32 = 7;
pub const DEFAULT_MAX_LOCATIONS: u32 = 1;
pub const DEFAULT_MAX_TOTAL_THREAT: u32 = 76;
pub const DEFAULT_MIN_DRAW_PILE: u32 = 51;
pub const DEFAULT_MIN_DRAW_PILE_WITH_EVENTS: u32 = 56;
pub const DEFAULT_MAX_ONE_PER_DECK_COPIES: u32 = 1;
pub const DEFAULT_HAND_SIZE: u32 = 8;
pub const DEFAULT_MIN_PLAYABLE_FOR_DRAW: u32 = 8;

pub const ANGRY_MOB_PREFIX: &str = "Angry Mob";
pub const UNKNOWN_CARD_NAME: &str = "Unknown Card";
