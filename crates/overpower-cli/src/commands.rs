// SPDX-License-Identifier: Apache-2.0

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::path::Path;

use overpower_catalog::{
    catalog_path, load_catalog_file, load_catalog_from_workspace, load_catalog_report,
    CardCatalog, InMemoryCatalog, IssueSeverity,
};
use overpower_model::Deck;
use overpower_rules::{
    decode_share_code, deck_fingerprint, deck_statistics, draw_hand, encode_share_code,
    export_deck, import_blockers, import_deck, load_rules_file, load_rules_from_workspace,
    parse_import_json, rules_path, total_threat, validate_deck, DeckInput, DeckRules,
    ExportContext, ImportError, ValidationOutcome,
};

use crate::helpers::{emit_ok, read_json, write_json};
use crate::{CliError, OutputMode, Sources};

fn emit(output_mode: OutputMode, payload: Value) -> Result<(), CliError> {
    emit_ok(output_mode, payload).map_err(CliError::internal)
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::internal(e.to_string()))
}

fn load_catalog(sources: &Sources) -> Result<InMemoryCatalog, CliError> {
    let loaded = match &sources.catalog {
        Some(path) => load_catalog_file(path),
        None => load_catalog_from_workspace(&sources.root),
    };
    loaded.map_err(|e| CliError::dependency(e.to_string()))
}

fn load_rules(sources: &Sources) -> Result<DeckRules, CliError> {
    let loaded = match &sources.rules {
        Some(path) => load_rules_file(path),
        None => load_rules_from_workspace(&sources.root),
    };
    loaded.map_err(|e| CliError::dependency(e.to_string()))
}

fn load_deck(path: &Path) -> Result<Deck, CliError> {
    let deck: Deck = read_json(path)?;
    deck.validate_shape()
        .map_err(|e| CliError::validation("invalid_deck", e.to_string()))?;
    tracing::debug!(deck = %deck.id, cards = deck.cards.len(), "deck loaded");
    Ok(deck)
}

pub(crate) fn validate(sources: &Sources, path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let catalog = load_catalog(sources)?;
    let rules = load_rules(sources)?;
    let deck = load_deck(path)?;
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &rules);
    emit(
        output_mode,
        json!({
            "command": "validate",
            "deck": deck.name,
            "outcome": report.outcome.label(),
            "report": to_value(&report)?,
        }),
    )?;
    match report.outcome {
        ValidationOutcome::Legal => Ok(()),
        ValidationOutcome::Limited => Err(CliError::validation(
            "deck_limited",
            format!(
                "deck \"{}\" is built under limited rules ({} rule violations)",
                deck.name,
                report.errors().count()
            ),
        )),
        ValidationOutcome::NotLegal => Err(CliError::validation(
            "deck_not_legal",
            format!(
                "deck \"{}\" is not legal ({} rule violations)",
                deck.name,
                report.errors().count()
            ),
        )),
    }
}

pub(crate) fn stats(sources: &Sources, path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let catalog = load_catalog(sources)?;
    let rules = load_rules(sources)?;
    let deck = load_deck(path)?;
    let stats = deck_statistics(&DeckInput::from(&deck), &catalog, &rules);
    emit(
        output_mode,
        json!({"command": "stats", "deck": deck.name, "stats": to_value(&stats)?}),
    )
}

pub(crate) fn threat(sources: &Sources, path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let catalog = load_catalog(sources)?;
    let rules = load_rules(sources)?;
    let deck = load_deck(path)?;
    let total = total_threat(&DeckInput::from(&deck), &catalog, &rules);
    emit(
        output_mode,
        json!({
            "command": "threat",
            "deck": deck.name,
            "total_threat": total,
            "max_total_threat": rules.max_total_threat,
        }),
    )
}

pub(crate) fn draw(
    sources: &Sources,
    path: &Path,
    seed: Option<u64>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let catalog = load_catalog(sources)?;
    let rules = load_rules(sources)?;
    let deck = load_deck(path)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let hand = draw_hand(&DeckInput::from(&deck), &catalog, &rules, &mut rng)
        .map_err(|e| CliError::validation("draw_failed", e.to_string()))?;
    emit(
        output_mode,
        json!({"command": "draw", "deck": deck.name, "seed": seed, "hand": to_value(&hand)?}),
    )
}

pub(crate) fn export(
    sources: &Sources,
    path: &Path,
    exported_by: &str,
    out: Option<&Path>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let catalog = load_catalog(sources)?;
    let rules = load_rules(sources)?;
    let deck = load_deck(path)?;
    let document = export_deck(&deck, &catalog, &rules, &ExportContext::now(exported_by));
    let value = to_value(&document)?;
    match out {
        Some(out) => {
            write_json(out, &value)?;
            emit(
                output_mode,
                json!({"command": "export", "status": "ok", "out": out}),
            )
        }
        None => emit(output_mode, value),
    }
}

pub(crate) fn import(
    sources: &Sources,
    path: &Path,
    deck_id: &str,
    out: Option<&Path>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let catalog = load_catalog(sources)?;
    let rules = load_rules(sources)?;
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CliError::input(
            "input_unreadable",
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    let document = parse_import_json(&raw).map_err(|e| match e {
        ImportError::Parse(_) => CliError::input("input_malformed", e.to_string()),
        other => CliError::validation("import_invalid", other.to_string()),
    })?;
    let outcome = import_deck(&document, &catalog)
        .map_err(|e| CliError::validation("import_invalid", e.to_string()))?;
    let unresolved = outcome.unresolved.clone();
    let deck = outcome.into_deck(deck_id, "Imported Deck");
    let report = validate_deck(&DeckInput::from(&deck), &catalog, &rules);
    let blockers: Vec<String> = import_blockers(&report)
        .into_iter()
        .map(|v| v.message.clone())
        .collect();

    emit(
        output_mode,
        json!({
            "command": "import",
            "deck": to_value(&deck)?,
            "unresolved": unresolved,
            "blockers": blockers,
        }),
    )?;
    if !unresolved.is_empty() {
        return Err(CliError::validation(
            "import_unresolved",
            format!(
                "could not find {} card(s): {}",
                unresolved.len(),
                unresolved.join(", ")
            ),
        ));
    }
    if !blockers.is_empty() {
        return Err(CliError::validation(
            "import_blocked",
            format!("imported deck breaks {} rule(s): {}", blockers.len(), blockers.join("; ")),
        ));
    }
    if let Some(out) = out {
        write_json(out, &to_value(&deck)?)?;
    }
    Ok(())
}

pub(crate) fn fingerprint(path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let deck = load_deck(path)?;
    emit(
        output_mode,
        json!({
            "command": "fingerprint",
            "deck": deck.name,
            "fingerprint": deck_fingerprint(&DeckInput::from(&deck)),
        }),
    )
}

pub(crate) fn share(path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let deck = load_deck(path)?;
    let code = encode_share_code(&deck).map_err(|e| CliError::internal(e.to_string()))?;
    emit(
        output_mode,
        json!({"command": "share", "deck": deck.name, "code": code}),
    )
}

pub(crate) fn unshare(
    code: &str,
    deck_id: &str,
    out: Option<&Path>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let deck = decode_share_code(code, deck_id)
        .map_err(|e| CliError::validation("invalid_share_code", e.to_string()))?;
    let value = to_value(&deck)?;
    match out {
        Some(out) => {
            write_json(out, &value)?;
            emit(
                output_mode,
                json!({"command": "unshare", "status": "ok", "out": out}),
            )
        }
        None => emit(output_mode, value),
    }
}

pub(crate) fn rules_show(sources: &Sources, output_mode: OutputMode) -> Result<(), CliError> {
    let rules = load_rules(sources)?;
    emit(
        output_mode,
        json!({"command": "rules show", "rules": to_value(&rules)?}),
    )
}

pub(crate) fn rules_check(sources: &Sources, output_mode: OutputMode) -> Result<(), CliError> {
    let (path, loaded) = match &sources.rules {
        Some(path) => (path.clone(), load_rules_file(path)),
        None => (rules_path(&sources.root), load_rules_from_workspace(&sources.root)),
    };
    loaded.map_err(|e| CliError::validation("rules_invalid", e.to_string()))?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };
    emit(
        output_mode,
        json!({"command": "rules check", "status": "ok", "source": source}),
    )
}

pub(crate) fn catalog_check(sources: &Sources, output_mode: OutputMode) -> Result<(), CliError> {
    let path = sources
        .catalog
        .clone()
        .unwrap_or_else(|| catalog_path(&sources.root));
    let (catalog, issues) =
        load_catalog_report(&path).map_err(|e| CliError::dependency(e.to_string()))?;
    let errors = issues
        .iter()
        .filter(|i| i.severity == IssueSeverity::Error)
        .count();
    emit(
        output_mode,
        json!({
            "command": "catalog check",
            "cards": catalog.len(),
            "issues": to_value(&issues)?,
        }),
    )?;
    if errors > 0 {
        return Err(CliError::validation(
            "catalog_invalid",
            format!("catalog has {errors} error(s)"),
        ));
    }
    Ok(())
}
