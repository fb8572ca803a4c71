// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Card catalog port.
//!
//! The validation engine only ever reads cards; every backend here is
//! loaded once and then queried through [`CardCatalog`].

mod check;
mod document;
mod memory;

pub use check::{check_catalog, CatalogIssue, IssueSeverity};
pub use document::{
    catalog_path, load_catalog_file, load_catalog_from_workspace, load_catalog_report,
    CatalogDocument, PowerCardRecord, DEFAULT_CATALOG_PATH,
};
pub use memory::InMemoryCatalog;

use overpower_model::{CardType, CatalogCard};
use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "overpower-catalog";

#[derive(Debug)]
#[non_exhaustive]
pub enum CatalogError {
    Io { path: String, message: String },
    Parse(String),
    Duplicate { card_type: CardType, id: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "read catalog {path} failed: {message}"),
            Self::Parse(message) => write!(f, "catalog parse failed: {message}"),
            Self::Duplicate { card_type, id } => {
                write!(f, "duplicate {card_type} card id `{id}` in catalog")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

pub trait CardCatalog {
    fn get(&self, card_type: CardType, id: &str) -> Option<&CatalogCard>;

    fn list(&self, card_type: CardType) -> Vec<&CatalogCard>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First card of `card_type` whose display name matches, ignoring case
    /// and surrounding whitespace.
    fn find_by_name(&self, card_type: CardType, name: &str) -> Option<&CatalogCard> {
        let wanted = name.trim();
        self.list(card_type)
            .into_iter()
            .find(|card| card.display_name().trim().eq_ignore_ascii_case(wanted))
    }
}
