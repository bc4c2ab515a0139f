use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::Block;

/// SHA-256 of the block's canonical JSON form, hex encoded.
///
/// Object keys are sorted at every level before serializing, so two
/// blocks with equal fields always hash the same however they were built.
pub fn digest(block: &Block) -> String {
    let value = serde_json::to_value(block).expect("serialize block");
    let canonical = canonicalize(value).to_string();
    sha256_hex(canonical.as_bytes())
}

/// Lower-case hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
