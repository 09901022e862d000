//! In-memory log store with a bounded window

use crate::hashing::compute_entry_hash;
use agentproof_domain::{EntryId, LogCategory, LogEntry};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// Placeholder message shown to readers without access to premium entries
pub const REDACTED_MESSAGE: &str = "[premium content - payment required]";

/// Ordered, append-only agent log
///
/// The store owns the chain tail: every appended entry is linked to the previous
/// entry's hash. With a capacity set, the oldest entries are dropped once the store
/// is full. Eviction never rewrites hashes, so the retained window starts with a
/// non-empty `previous_hash` and a verifier reports it as truncated.
#[derive(Debug, Clone, Default)]
pub struct LogStore {
    entries: VecDeque<LogEntry>,
    next_id: u64,
    capacity: Option<usize>,
    evicted: u64,
    tail_hash: String,
}

impl LogStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that keeps at most `capacity` entries (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    /// Append a new entry, chaining it to the current tail
    pub fn append(
        &mut self,
        message: impl Into<String>,
        category: LogCategory,
        details: Option<Value>,
        timestamp: impl Into<String>,
    ) -> LogEntry {
        let message = message.into();
        let timestamp = timestamp.into();
        let current_hash = compute_entry_hash(
            &self.tail_hash,
            &message,
            &category,
            details.as_ref(),
            &timestamp,
        );

        let entry = LogEntry {
            id: EntryId::Counter(self.next_id),
            sequence_number: Some(self.next_id),
            timestamp,
            message,
            category,
            details,
            previous_hash: std::mem::replace(&mut self.tail_hash, current_hash.clone()),
            current_hash,
        };
        self.next_id += 1;

        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.pop_front();
                self.evicted += 1;
            }
        }

        debug!(id = %entry.id, category = %entry.category, "appended log entry");
        self.entries.push_back(entry.clone());
        entry
    }

    /// Append an entry stamped with the current UTC time
    pub fn append_now(
        &mut self,
        message: impl Into<String>,
        category: LogCategory,
        details: Option<Value>,
    ) -> LogEntry {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.append(message, category, details, timestamp)
    }

    /// All retained entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Retained entries with premium content hidden unless `include_premium`
    ///
    /// Redacted entries keep their hash fields, so the view is for display only and
    /// will not pass hash verification.
    pub fn redacted(&self, include_premium: bool) -> Vec<LogEntry> {
        self.entries
            .iter()
            .map(|entry| {
                if include_premium || !entry.category.is_premium() {
                    entry.clone()
                } else {
                    LogEntry {
                        message: REDACTED_MESSAGE.to_string(),
                        details: None,
                        ..entry.clone()
                    }
                }
            })
            .collect()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hash of the most recently appended entry (empty before the first append)
    pub fn tail_hash(&self) -> &str {
        &self.tail_hash
    }

    /// Number of entries dropped by the capacity policy
    pub fn evicted_count(&self) -> u64 {
        self.evicted
    }

    /// Whether the retained window no longer starts at the chain's first entry
    pub fn is_truncated(&self) -> bool {
        self.evicted > 0
    }

    /// Configured capacity, if bounded
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_links_entries() {
        let mut store = LogStore::new();
        let first = store.append("one", LogCategory::System, None, "t1");
        let second = store.append("two", LogCategory::Public, Some(json!({"k": 1})), "t2");

        assert_eq!(first.previous_hash, "");
        assert_eq!(second.previous_hash, first.current_hash);
        assert_eq!(store.tail_hash(), second.current_hash);
        assert_eq!(first.id, EntryId::Counter(0));
        assert_eq!(second.id, EntryId::Counter(1));
        assert_eq!(second.sequence_number, Some(1));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut store = LogStore::with_capacity(2);
        store.append("a", LogCategory::System, None, "t1");
        store.append("b", LogCategory::System, None, "t2");
        let c = store.append("c", LogCategory::System, None, "t3");

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "b");
        assert_eq!(entries[1], c);
        assert_eq!(store.evicted_count(), 1);
        assert!(store.is_truncated());
        // Window start still points at the evicted entry
        assert!(!entries[0].previous_hash.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut store = LogStore::with_capacity(0);
        store.append("a", LogCategory::System, None, "t1");
        assert_eq!(store.len(), 1);
        assert_eq!(store.capacity(), Some(1));
    }

    #[test]
    fn test_redaction_hides_premium_only() {
        let mut store = LogStore::new();
        store.append("free alpha", LogCategory::Public, None, "t1");
        store.append("paid alpha", LogCategory::Premium, Some(json!({"entry": 1.2})), "t2");

        let view = store.redacted(false);
        assert_eq!(view[0].message, "free alpha");
        assert_eq!(view[1].message, REDACTED_MESSAGE);
        assert!(view[1].details.is_none());
        assert_eq!(view[1].current_hash, store.entries()[1].current_hash);

        let full = store.redacted(true);
        assert_eq!(full[1].message, "paid alpha");
    }

    #[test]
    fn test_append_now_uses_rfc3339() {
        let mut store = LogStore::new();
        let entry = store.append_now("tick", LogCategory::System, None);
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
        assert!(entry.timestamp.ends_with('Z'));
    }
}
