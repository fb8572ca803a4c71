// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use overpower_core::{resolve_config_file, ENV_OVERPOWER_CATALOG_PATH};
use overpower_model::{
    AdvancedUniverseCard, AllyUniverseCard, AspectCard, BasicUniverseCard, CardType, CatalogCard,
    CharacterCard, EventCard, LocationCard, MissionCard, PowerCard, PowerType, SpecialCard,
    TeamworkCard, TrainingCard, ValidationError,
};

use crate::check::sort_issues;
use crate::{check_catalog, CardCatalog, CatalogError, CatalogIssue, InMemoryCatalog, IssueSeverity};

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";

/// Power card as stored on disk. The power type stays raw text until the
/// catalog is built, so one bad row can be reported instead of failing the
/// whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerCardRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub power_type: String,
    pub value: u32,
    #[serde(default)]
    pub one_per_deck: bool,
    #[serde(default)]
    pub alternate_images: Vec<String>,
}

impl PowerCardRecord {
    pub fn into_card(self) -> Result<PowerCard, ValidationError> {
        Ok(PowerCard {
            power_type: PowerType::parse(&self.power_type)?,
            id: self.id,
            name: self.name,
            value: self.value,
            one_per_deck: self.one_per_deck,
            alternate_images: self.alternate_images,
        })
    }
}

/// On-disk catalog: one array per card table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub characters: Vec<CharacterCard>,
    #[serde(default)]
    pub special_cards: Vec<SpecialCard>,
    #[serde(default)]
    pub power_cards: Vec<PowerCardRecord>,
    #[serde(default)]
    pub missions: Vec<MissionCard>,
    #[serde(default)]
    pub events: Vec<EventCard>,
    #[serde(default)]
    pub locations: Vec<LocationCard>,
    #[serde(default)]
    pub aspects: Vec<AspectCard>,
    #[serde(default)]
    pub advanced_universe: Vec<AdvancedUniverseCard>,
    #[serde(default)]
    pub teamwork: Vec<TeamworkCard>,
    #[serde(default)]
    pub ally_universe: Vec<AllyUniverseCard>,
    #[serde(default)]
    pub training: Vec<TrainingCard>,
    #[serde(default)]
    pub basic_universe: Vec<BasicUniverseCard>,
}

impl CatalogDocument {
    pub fn parse_json(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Cards plus one issue per power card whose type does not parse.
    fn split_cards(self) -> (Vec<CatalogCard>, Vec<CatalogIssue>) {
        let mut out = Vec::new();
        let mut issues = Vec::new();
        out.extend(self.characters.into_iter().map(CatalogCard::Character));
        out.extend(self.special_cards.into_iter().map(CatalogCard::Special));
        for record in self.power_cards {
            let id = record.id.clone();
            match record.into_card() {
                Ok(card) => out.push(CatalogCard::Power(card)),
                Err(err) => issues.push(CatalogIssue {
                    code: "catalog.power.type.invalid",
                    severity: IssueSeverity::Error,
                    card_type: CardType::Power,
                    card_id: id,
                    message: err.0,
                }),
            }
        }
        out.extend(self.missions.into_iter().map(CatalogCard::Mission));
        out.extend(self.events.into_iter().map(CatalogCard::Event));
        out.extend(self.locations.into_iter().map(CatalogCard::Location));
        out.extend(self.aspects.into_iter().map(CatalogCard::Aspect));
        out.extend(
            self.advanced_universe
                .into_iter()
                .map(CatalogCard::AdvancedUniverse),
        );
        out.extend(self.teamwork.into_iter().map(CatalogCard::Teamwork));
        out.extend(self.ally_universe.into_iter().map(CatalogCard::AllyUniverse));
        out.extend(self.training.into_iter().map(CatalogCard::Training));
        out.extend(self.basic_universe.into_iter().map(CatalogCard::BasicUniverse));
        (out, issues)
    }

    /// Strict conversion: any unparseable power type fails the catalog.
    pub fn into_cards(self) -> Result<Vec<CatalogCard>, CatalogError> {
        let (cards, issues) = self.split_cards();
        match issues.into_iter().next() {
            Some(issue) => Err(CatalogError::Parse(format!(
                "power card `{}`: {}",
                issue.card_id, issue.message
            ))),
            None => Ok(cards),
        }
    }

    pub fn into_catalog(self) -> Result<InMemoryCatalog, CatalogError> {
        InMemoryCatalog::from_cards(self.into_cards()?)
    }

    /// Builds the catalog from every card that converts and reports the rest.
    pub fn into_catalog_with_issues(
        self,
    ) -> Result<(InMemoryCatalog, Vec<CatalogIssue>), CatalogError> {
        let (cards, issues) = self.split_cards();
        Ok((InMemoryCatalog::from_cards(cards)?, issues))
    }
}

/// Catalog location for a workspace, honoring `OVERPOWER_CATALOG_PATH`.
#[must_use]
pub fn catalog_path(root: &Path) -> PathBuf {
    resolve_config_file(root, ENV_OVERPOWER_CATALOG_PATH, DEFAULT_CATALOG_PATH)
}

fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn load_catalog_file(path: &Path) -> Result<InMemoryCatalog, CatalogError> {
    let raw = read_catalog(path)?;
    let catalog = CatalogDocument::parse_json(&raw)?.into_catalog()?;
    tracing::debug!(
        path = %path.display(),
        cards = catalog.len(),
        "card catalog loaded"
    );
    Ok(catalog)
}

pub fn load_catalog_from_workspace(root: &Path) -> Result<InMemoryCatalog, CatalogError> {
    load_catalog_file(&catalog_path(root))
}

/// Loads a catalog for auditing: rows that cannot be converted are reported
/// alongside the integrity issues of the cards that loaded.
pub fn load_catalog_report(
    path: &Path,
) -> Result<(InMemoryCatalog, Vec<CatalogIssue>), CatalogError> {
    let raw = read_catalog(path)?;
    let (catalog, mut issues) = CatalogDocument::parse_json(&raw)?.into_catalog_with_issues()?;
    issues.extend(check_catalog(&catalog));
    sort_issues(&mut issues);
    Ok((catalog, issues))
}
