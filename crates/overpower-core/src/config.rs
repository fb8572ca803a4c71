// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

pub const ENV_OVERPOWER_CATALOG_PATH: &str = "OVERPOWER_CATALOG_PATH";
pub const ENV_OVERPOWER_RULES_PATH: &str = "OVERPOWER_RULES_PATH";
pub const ENV_OVERPOWER_LOG: &str = "OVERPOWER_LOG";
pub const ENV_OVERPOWER_LOG_JSON: &str = "OVERPOWER_LOG_JSON";

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Resolves a config file: an explicit env override wins, then the
/// workspace-relative default under `root`.
#[must_use]
pub fn resolve_config_file(root: &Path, env_key: &str, default_relative: &str) -> PathBuf {
    match non_empty_env(env_key) {
        Some(explicit) => PathBuf::from(explicit),
        None => root.join(default_relative),
    }
}

#[must_use]
pub fn env_flag(key: &str, default: bool) -> bool {
    match non_empty_env(key) {
        Some(raw) => matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}
