// SPDX-License-Identifier: Apache-2.0

//! Order-independent JSON encoding and hashing.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;

/// Compact JSON with object keys in sorted order at every depth.
///
/// Going through `Value` is enough: without serde_json's `preserve_order`
/// feature its object map is a `BTreeMap`.
pub fn stable_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&serde_json::to_value(value)?)
}

pub fn stable_json_hash_hex<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = stable_json_bytes(value)?;
    Ok(crate::sha256_hex(&bytes))
}

pub fn encode_token<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
    let bytes = stable_json_bytes(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

pub fn decode_token(token: &str) -> Result<Value, String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|e| format!("token base64 decode failed: {e}"))?;
    serde_json::from_slice::<Value>(&bytes).map_err(|e| format!("token JSON decode failed: {e}"))
}

