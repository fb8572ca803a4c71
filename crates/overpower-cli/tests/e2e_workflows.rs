// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn overpower() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_overpower"));
    cmd.current_dir(workspace_root())
        .env_remove("OVERPOWER_CATALOG_PATH")
        .env_remove("OVERPOWER_RULES_PATH")
        .env_remove("OVERPOWER_LOG_JSON");
    cmd
}

fn run_json(args: &[&str]) -> (Option<i32>, Value, String) {
    let output = overpower()
        .arg("--json")
        .args(args)
        .output()
        .expect("run overpower");
    let stdout: Value = serde_json::from_slice(&output.stdout).unwrap_or(Value::Null);
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    (output.status.code(), stdout, stderr)
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn legal_deck_validates_cleanly() {
    let (code, stdout, _) = run_json(&["validate", "data/decks/jungle_legal.json"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout["outcome"], "Legal");
    assert_eq!(stdout["report"]["total_threat"], 76);
    assert_eq!(stdout["report"]["violations"], Value::Array(Vec::new()));
}

#[test]
fn broken_deck_exits_with_validation_code() {
    let (code, stdout, stderr) = run_json(&["validate", "data/decks/broken.json"]);
    assert_eq!(code, Some(3));
    assert_eq!(stdout["outcome"], "Not Legal");
    assert_eq!(stdout["report"]["violations"][0]["rule"], "character_count");
    let error: Value = serde_json::from_str(stderr.trim()).expect("machine error");
    assert_eq!(error["code"], "deck_not_legal");
    assert_eq!(
        error["message"],
        "deck \"Everything Wrong\" is not legal (12 rule violations)"
    );
}

#[test]
fn stats_and_threat_report_sample_numbers() {
    let (code, stdout, _) = run_json(&["stats", "data/decks/jungle_legal.json"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout["stats"]["draw_pile_cards"], 54);
    assert_eq!(stdout["stats"]["icon_totals"]["combat"], 20);
    assert_eq!(stdout["stats"]["type_breakdown"]["power"], 47);

    let (code, stdout, _) = run_json(&["threat", "data/decks/jungle_legal.json"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout["total_threat"], 76);
    assert_eq!(stdout["max_total_threat"], 76);
}

#[test]
fn seeded_draw_is_stable_across_runs() {
    let (code, first, _) = run_json(&["draw", "data/decks/jungle_legal.json", "--seed", "42"]);
    assert_eq!(code, Some(0));
    let (_, second, _) = run_json(&["draw", "data/decks/jungle_legal.json", "--seed", "42"]);
    assert_eq!(first, second);
    assert_eq!(first["hand"]["cards"].as_array().map(Vec::len), Some(8));
}

#[test]
fn export_then_import_round_trips_through_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let export_path = dir.path().join("export.json");
    let deck_path = dir.path().join("deck.json");

    let (code, stdout, stderr) = run_json(&[
        "export",
        "data/decks/jungle_legal.json",
        "--exported-by",
        "Tester",
        "--out",
        &path_arg(&export_path),
    ]);
    assert_eq!(code, Some(0), "{stderr}");
    assert_eq!(stdout["status"], "ok");
    let exported: Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).expect("read export"))
            .expect("export json");
    assert_eq!(exported["exported_by"], "Tester");
    assert_eq!(exported["legal"], true);

    let (code, stdout, stderr) = run_json(&[
        "import",
        &path_arg(&export_path),
        "--out",
        &path_arg(&deck_path),
    ]);
    assert_eq!(code, Some(0), "{stderr}");
    assert_eq!(stdout["unresolved"], Value::Array(Vec::new()));

    let (_, original, _) = run_json(&["fingerprint", "data/decks/jungle_legal.json"]);
    let (_, restored, _) = run_json(&["fingerprint", &path_arg(&deck_path)]);
    assert_eq!(original["fingerprint"], restored["fingerprint"]);
    assert_eq!(restored["deck"], "Lord of the Jungle");
}

#[test]
fn import_with_unknown_names_fails_without_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let export_path = dir.path().join("export.json");
    let deck_path = dir.path().join("deck.json");
    std::fs::write(
        &export_path,
        r#"{"name": "Partial", "cards": {"characters": ["Tarzan", "Nobody Special"]}}"#,
    )
    .expect("write export");
    let (code, stdout, stderr) = run_json(&[
        "import",
        &path_arg(&export_path),
        "--out",
        &path_arg(&deck_path),
    ]);
    assert_eq!(code, Some(3));
    assert_eq!(stdout["unresolved"][0], "Nobody Special");
    let error: Value = serde_json::from_str(stderr.trim()).expect("machine error");
    assert_eq!(error["code"], "import_unresolved");
    assert!(!deck_path.exists());
}

#[test]
fn share_code_decodes_to_the_same_cards() {
    let dir = tempfile::tempdir().expect("tempdir");
    let deck_path = dir.path().join("shared.json");
    let (code, shared, _) = run_json(&["share", "data/decks/jungle_legal.json"]);
    assert_eq!(code, Some(0));
    let share_code = shared["code"].as_str().expect("code").to_string();

    let (code, _, stderr) = run_json(&["unshare", &share_code, "--out", &path_arg(&deck_path)]);
    assert_eq!(code, Some(0), "{stderr}");
    let (_, original, _) = run_json(&["fingerprint", "data/decks/jungle_legal.json"]);
    let (_, restored, _) = run_json(&["fingerprint", &path_arg(&deck_path)]);
    assert_eq!(original["fingerprint"], restored["fingerprint"]);

    let (code, _, stderr) = run_json(&["unshare", "%%%"]);
    assert_eq!(code, Some(3));
    assert!(stderr.contains("invalid_share_code"));
}

#[test]
fn rules_show_and_check_use_workspace_config() {
    let (code, stdout, _) = run_json(&["rules", "show"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout["rules"]["max_total_threat"], 76);

    let (code, stdout, _) = run_json(&["rules", "check"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout["status"], "ok");
}

#[test]
fn invalid_rules_file_fails_the_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rules_path = dir.path().join("rules.json");
    std::fs::write(&rules_path, r#"{"hand_size": 0}"#).expect("write rules");
    let (code, _, stderr) = run_json(&["--rules", &path_arg(&rules_path), "rules", "check"]);
    assert_eq!(code, Some(3));
    let error: Value = serde_json::from_str(stderr.trim()).expect("machine error");
    assert_eq!(error["code"], "rules_invalid");
    assert_eq!(error["message"], "hand_size must be > 0");
}

#[test]
fn tighter_rules_file_changes_the_verdict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rules_path = dir.path().join("rules.json");
    std::fs::write(&rules_path, r#"{"max_total_threat": 70}"#).expect("write rules");
    let (code, stdout, _) = run_json(&[
        "--rules",
        &path_arg(&rules_path),
        "validate",
        "data/decks/jungle_legal.json",
    ]);
    assert_eq!(code, Some(3));
    assert_eq!(stdout["report"]["violations"][0]["rule"], "threat_level");
}

#[test]
fn sample_catalog_is_clean() {
    let (code, stdout, _) = run_json(&["catalog", "check"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout["issues"], Value::Array(Vec::new()));
    assert_eq!(stdout["cards"], 86);
}

fn legal_deck_json() -> Value {
    let raw = std::fs::read_to_string(workspace_root().join("data/decks/jungle_legal.json"))
        .expect("read deck");
    serde_json::from_str(&raw).expect("deck json")
}

#[test]
fn limited_deck_never_exits_as_legal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let deck_path = dir.path().join("limited.json");
    let mut deck = legal_deck_json();
    deck["is_limited"] = Value::Bool(true);
    std::fs::write(&deck_path, deck.to_string()).expect("write deck");

    let (code, stdout, stderr) = run_json(&["validate", &path_arg(&deck_path)]);
    assert_eq!(code, Some(3));
    assert_eq!(stdout["outcome"], "Limited");
    assert_eq!(stdout["report"]["violations"], Value::Array(Vec::new()));
    let error: Value = serde_json::from_str(stderr.trim()).expect("machine error");
    assert_eq!(error["code"], "deck_limited");
}

#[test]
fn oversized_quantity_is_rejected_before_any_rule_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let deck_path = dir.path().join("huge.json");
    let mut deck = legal_deck_json();
    deck["cards"][12]["quantity"] = Value::from(u32::MAX);
    std::fs::write(&deck_path, deck.to_string()).expect("write deck");

    for command in ["validate", "draw", "export"] {
        let (code, _, stderr) = run_json(&[command, &path_arg(&deck_path)]);
        assert_eq!(code, Some(3), "{command}");
        let error: Value = serde_json::from_str(stderr.trim()).expect("machine error");
        assert_eq!(error["code"], "invalid_deck");
    }
}

#[test]
fn catalog_check_reports_bad_power_types() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{"power_cards": [{"id": "p1", "power_type": "Speed", "value": 2}]}"#,
    )
    .expect("write catalog");
    let (code, stdout, stderr) =
        run_json(&["--catalog", &path_arg(&catalog_path), "catalog", "check"]);
    assert_eq!(code, Some(3));
    assert_eq!(stdout["cards"], 0);
    assert_eq!(stdout["issues"][0]["code"], "catalog.power.type.invalid");
    assert!(stderr.contains("catalog_invalid"));
}
