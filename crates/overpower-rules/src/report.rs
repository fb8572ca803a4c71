// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RuleId {
    CharacterCount,
    MissionCount,
    MissionSet,
    LocationCount,
    ThreatLevel,
    DeckSize,
    AngryMobLimit,
    UnusableSpecial,
    UnusableEvent,
    OnePerDeckViolation,
    UnusablePower,
    UnusableUniverse,
    AssistLimit,
    AmbushLimit,
    CataclysmLimit,
    FortificationLimit,
    UnknownCard,
    InvalidReserve,
}

impl RuleId {
    pub const ALL: [RuleId; 18] = [
        Self::CharacterCount,
        Self::MissionCount,
        Self::MissionSet,
        Self::LocationCount,
        Self::ThreatLevel,
        Self::DeckSize,
        Self::AngryMobLimit,
        Self::UnusableSpecial,
        Self::UnusableEvent,
        Self::OnePerDeckViolation,
        Self::UnusablePower,
        Self::UnusableUniverse,
        Self::AssistLimit,
        Self::AmbushLimit,
        Self::CataclysmLimit,
        Self::FortificationLimit,
        Self::UnknownCard,
        Self::InvalidReserve,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CharacterCount => "character_count",
            Self::MissionCount => "mission_count",
            Self::MissionSet => "mission_set",
            Self::LocationCount => "location_count",
            Self::ThreatLevel => "threat_level",
            Self::DeckSize => "deck_size",
            Self::AngryMobLimit => "angry_mob_limit",
            Self::UnusableSpecial => "unusable_special",
            Self::UnusableEvent => "unusable_event",
            Self::OnePerDeckViolation => "one_per_deck_violation",
            Self::UnusablePower => "unusable_power",
            Self::UnusableUniverse => "unusable_universe",
            Self::AssistLimit => "assist_limit",
            Self::AmbushLimit => "ambush_limit",
            Self::CataclysmLimit => "cataclysm_limit",
            Self::FortificationLimit => "fortification_limit",
            Self::UnknownCard => "unknown_card",
            Self::InvalidReserve => "invalid_reserve",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnknownCard => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl Display for RuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckViolation {
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
    /// Machine-readable detail, e.g. the offending card ids.
    pub evidence: String,
}

impl DeckViolation {
    #[must_use]
    pub fn new(rule: RuleId, message: String, evidence: String) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            message,
            evidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    Legal,
    NotLegal,
    Limited,
}

impl ValidationOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legal => "Legal",
            Self::NotLegal => "Not Legal",
            Self::Limited => "Limited",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationReport {
    pub outcome: ValidationOutcome,
    pub violations: Vec<DeckViolation>,
    pub total_threat: u32,
    pub draw_pile_count: u32,
}

impl ValidationReport {
    /// True when no error-severity violation exists, limited or not.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        !self
            .violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    #[must_use]
    pub fn errors(&self) -> impl Iterator<Item = &DeckViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    #[must_use]
    pub fn has_rule(&self, rule: RuleId) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_ids_serialize_as_snake_case() {
        for rule in RuleId::ALL {
            let encoded = serde_json::to_string(&rule).expect("encode");
            assert_eq!(encoded, format!("\"{}\"", rule.as_str()));
        }
    }

    #[test]
    fn warnings_do_not_break_legality() {
        let report = ValidationReport {
            outcome: ValidationOutcome::Legal,
            violations: vec![DeckViolation::new(
                RuleId::UnknownCard,
                "unknown".to_string(),
                "power/p99".to_string(),
            )],
            total_threat: 0,
            draw_pile_count: 0,
        };
        assert!(report.is_legal());
        assert_eq!(report.errors().count(), 0);
        assert!(report.has_rule(RuleId::UnknownCard));
    }
}
