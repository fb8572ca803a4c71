// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Deck construction rules for Overpower.
//!
//! [`validate_deck`] runs every legality rule and returns all findings in one
//! [`ValidationReport`]. Threat, statistics, draw simulation, export/import
//! and fingerprints all read the same catalog-resolved view of a deck.

mod config;
mod draw;
mod engine;
mod export;
mod fingerprint;
mod input;
mod limits;
mod report;
mod resolve;
mod stats;
mod threat;

pub use config::{
    canonical_rules_json, load_rules_file, load_rules_from_workspace, parse_rules_json,
    rules_path, validate_rules_config, DeckRules, ReserveThreatAdjustment, RulesConfigError,
    DEFAULT_RULES_PATH,
};
pub use draw::{draw_hand, DrawError, DrawnCard, DrawnHand};
pub use engine::{parse_to_use, validate_deck};
pub use export::{
    export_deck, import_blockers, import_deck, parse_import_json, DeckExport, ExportCards,
    ExportContext, ImportDocument, ImportError, ImportOutcome,
};
pub use fingerprint::{decode_share_code, deck_fingerprint, encode_share_code, ShareCodeError};
pub use input::DeckInput;
pub use limits::{ANGRY_MOB_PREFIX, RULES_SCHEMA_VERSION, UNKNOWN_CARD_NAME};
pub use report::{DeckViolation, RuleId, Severity, ValidationOutcome, ValidationReport};
pub use stats::{deck_statistics, DeckStatistics, IconTotals};
pub use threat::total_threat;

pub const CRATE_NAME: &str = "overpower-rules";
