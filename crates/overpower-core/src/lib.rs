// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared plumbing for the Overpower deck tools: process exit codes,
//! machine-readable errors, content hashing and config path resolution.

pub mod canonical;
mod config;
mod errors;

pub use config::{
    env_flag, resolve_config_file, ENV_OVERPOWER_CATALOG_PATH, ENV_OVERPOWER_LOG,
    ENV_OVERPOWER_LOG_JSON, ENV_OVERPOWER_RULES_PATH,
};
pub use errors::{ExitCode, MachineError};

use sha2::{Digest, Sha256};

pub const CRATE_NAME: &str = "overpower-core";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
