//! Entry hashing and chain roots
//!
//! # Canonical content
//!
//! The content hashed for an entry is compact JSON (no whitespace) of an object with
//! exactly these keys, in this order:
//!
//! ```text
//! {"message":<string>,"category":<string>,"details":<value|null>,"timestamp":<string>}
//! ```
//!
//! - `category` is the wire name (`"tool_use"`, not `"ToolUse"`).
//! - Absent details serialize as `null`, the same as explicit JSON `null`.
//! - Objects nested inside `details` are written with their keys sorted
//!   lexicographically at every depth, whatever order they arrived in.
//!
//! The entry hash is `sha256(previous_hash ++ canonical)` rendered as lowercase hex,
//! where `previous_hash` is the hex text itself (not decoded bytes).

use agentproof_domain::{LogCategory, LogEntry};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Root of the empty chain: SHA-256 of the empty string
pub const EMPTY_CHAIN_ROOT: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Field order here is the wire contract between producer and verifier
#[derive(Serialize)]
struct CanonicalContent<'a> {
    message: &'a str,
    category: &'a str,
    details: Value,
    timestamp: &'a str,
}

/// Serialize an entry's content fields in canonical form
pub fn canonical_content(
    message: &str,
    category: &LogCategory,
    details: Option<&Value>,
    timestamp: &str,
) -> String {
    let content = CanonicalContent {
        message,
        category: category.as_str(),
        details: details.map(sort_keys).unwrap_or(Value::Null),
        timestamp,
    };

    // Strings and string-keyed JSON values always serialize.
    serde_json::to_string(&content).unwrap_or_default()
}

/// Rebuild a value with object keys inserted in sorted order at every depth
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Compute the chain hash for a new entry
///
/// Pure: the same inputs always yield the same lowercase hex digest.
pub fn compute_entry_hash(
    previous_hash: &str,
    message: &str,
    category: &LogCategory,
    details: Option<&Value>,
    timestamp: &str,
) -> String {
    let canonical = canonical_content(message, category, details, timestamp);
    let mut hasher = Sha256::new();
    hasher.update(previous_hash.as_bytes());
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the hash an entry should carry, from its own `previous_hash` and content
pub fn recompute_entry_hash(entry: &LogEntry) -> String {
    compute_entry_hash(
        &entry.previous_hash,
        &entry.message,
        &entry.category,
        entry.details.as_ref(),
        &entry.timestamp,
    )
}

/// Raw root digest over every entry's `current_hash`, in order
pub fn chain_root_digest(logs: &[LogEntry]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for entry in logs {
        hasher.update(entry.current_hash.as_bytes());
    }
    hasher.finalize().into()
}

/// Hex root over every entry's `current_hash`, in order
///
/// Entries without a hash contribute the empty string. An empty log yields
/// [`EMPTY_CHAIN_ROOT`].
pub fn calculate_chain_root_hash(logs: &[LogEntry]) -> String {
    hex::encode(chain_root_digest(logs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_field_order() {
        let canonical = canonical_content(
            "hello",
            &LogCategory::Public,
            None,
            "2025-01-01T00:00:00.000Z",
        );
        assert_eq!(
            canonical,
            r#"{"message":"hello","category":"public","details":null,"timestamp":"2025-01-01T00:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_explicit_null_details_match_absent() {
        let absent = canonical_content("m", &LogCategory::System, None, "t");
        let null = canonical_content("m", &LogCategory::System, Some(&Value::Null), "t");
        assert_eq!(absent, null);
    }

    #[test]
    fn test_nested_keys_are_sorted() {
        let details = json!({"zeta": 1, "alpha": {"y": true, "b": [{"d": 1, "c": 2}]}});
        let canonical = canonical_content("m", &LogCategory::System, Some(&details), "t");
        assert!(canonical.contains(r#""details":{"alpha":{"b":[{"c":2,"d":1}],"y":true},"zeta":1}"#));
    }

    #[test]
    fn test_pinned_first_entry_digest() {
        let hash = compute_entry_hash(
            "",
            "hello",
            &LogCategory::Public,
            None,
            "2025-01-01T00:00:00.000Z",
        );
        assert_eq!(
            hash,
            "2ffac5b3ceb2d7fcf7c05d2fcb1330f2164849164efba3ca21131261ef9dff11"
        );
    }

    #[test]
    fn test_pinned_chained_digest() {
        let first = "2ffac5b3ceb2d7fcf7c05d2fcb1330f2164849164efba3ca21131261ef9dff11";
        let details = json!({"token": "SOL", "amount": 1.5});
        let hash = compute_entry_hash(
            first,
            "bought SOL",
            &LogCategory::ToolUse,
            Some(&details),
            "2025-01-01T00:00:01.000Z",
        );
        assert_eq!(
            hash,
            "16df505f20feb279f99cf66998685aacd5d14622403ae2d8fc2f96b52b689eec"
        );
    }

    #[test]
    fn test_empty_root_is_sha256_of_empty_string() {
        assert_eq!(calculate_chain_root_hash(&[]), EMPTY_CHAIN_ROOT);
    }

    #[test]
    fn test_root_depends_only_on_hashes_and_order() {
        let mut a = LogEntry::new(1, "t1", "one", LogCategory::Public);
        a.current_hash = "aa".into();
        let mut b = LogEntry::new(2, "t2", "two", LogCategory::Public);
        b.current_hash = "bb".into();

        // Same hashes, different content: same root
        let mut a2 = a.clone();
        a2.message = "rewritten".into();
        assert_eq!(
            calculate_chain_root_hash(&[a.clone(), b.clone()]),
            calculate_chain_root_hash(&[a2, b.clone()])
        );

        // Order matters
        assert_ne!(
            calculate_chain_root_hash(&[a.clone(), b.clone()]),
            calculate_chain_root_hash(&[b, a])
        );
    }
}
