// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::{CliError, OutputMode};

pub(crate) fn emit_ok(output_mode: OutputMode, payload: Value) -> Result<(), String> {
    if output_mode.json {
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CliError::input(
            "input_unreadable",
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        CliError::input(
            "input_malformed",
            format!("failed to parse {}: {e}", path.display()),
        )
    })
}

pub(crate) fn write_json(path: &Path, payload: &Value) -> Result<(), CliError> {
    let encoded = serde_json::to_string_pretty(payload).map_err(|e| CliError::internal(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::input(
                "output_unwritable",
                format!("failed to create {}: {e}", parent.display()),
            )
        })?;
    }
    fs::write(path, format!("{encoded}\n")).map_err(|e| {
        CliError::input(
            "output_unwritable",
            format!("failed to write {}: {e}", path.display()),
        )
    })
}
