//! Log entry module - the unit of the hash chain

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Category of a log entry
///
/// The set is open: unknown categories are kept verbatim in `Other` so that a
/// verifier reproduces the producer's bytes exactly. Categories affect redaction
/// (premium content) but never chain validity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogCategory {
    /// Publicly visible agent output
    Public,
    /// Internal system events
    System,
    /// The agent invoked a tool
    ToolUse,
    /// A tool returned a result
    ToolResult,
    /// Paid content, redacted for unpaid readers
    Premium,
    /// The agent's own "voice" output
    AgentSpeech,
    /// Errors raised during the agent loop
    Error,
    /// Alerts raised by the agent
    Alert,
    /// Any category not listed above
    Other(String),
}

impl LogCategory {
    /// Get the wire name of the category
    pub fn as_str(&self) -> &str {
        match self {
            LogCategory::Public => "public",
            LogCategory::System => "system",
            LogCategory::ToolUse => "tool_use",
            LogCategory::ToolResult => "tool_result",
            LogCategory::Premium => "premium",
            LogCategory::AgentSpeech => "agent_speech",
            LogCategory::Error => "error",
            LogCategory::Alert => "alert",
            LogCategory::Other(name) => name,
        }
    }

    /// Parse a category from its wire name
    ///
    /// Matching is exact: the name is part of the hashed content, so no case folding.
    pub fn parse(s: &str) -> Self {
        match s {
            "public" => LogCategory::Public,
            "system" => LogCategory::System,
            "tool_use" => LogCategory::ToolUse,
            "tool_result" => LogCategory::ToolResult,
            "premium" => LogCategory::Premium,
            "agent_speech" => LogCategory::AgentSpeech,
            "error" => LogCategory::Error,
            "alert" => LogCategory::Alert,
            other => LogCategory::Other(other.to_string()),
        }
    }

    /// Whether entries of this category are hidden from unpaid readers
    pub fn is_premium(&self) -> bool {
        matches!(self, LogCategory::Premium)
    }
}

impl From<String> for LogCategory {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<LogCategory> for String {
    fn from(category: LogCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a log entry
///
/// The log store assigns numeric counters. Other producers use composite string
/// keys such as `"1717000000-0"`; both shapes are accepted on the wire. The id
/// is not part of the hashed content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    /// Monotonic counter assigned by the log store
    Counter(u64),
    /// Opaque producer-chosen key
    Key(String),
}

impl EntryId {
    /// The numeric counter, if this id is one
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            Self::Counter(n) => Some(*n),
            Self::Key(_) => None,
        }
    }
}

impl From<u64> for EntryId {
    fn from(n: u64) -> Self {
        Self::Counter(n)
    }
}

impl From<String> for EntryId {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for EntryId {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter(n) => write!(f, "{}", n),
            Self::Key(key) => f.write_str(key),
        }
    }
}

/// One agent action or utterance in the hash chain
///
/// Entries are created and appended only by the producing agent and are never
/// mutated afterwards. Field names on the wire follow the proof endpoint's JSON
/// shape (`type` for the category, snake_case hash fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Store counter or producer key
    pub id: EntryId,

    /// Explicit chain position; when absent, array order is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,

    /// ISO-8601 creation time
    pub timestamp: String,

    /// Free-form human-readable text
    pub message: String,

    /// Entry category
    #[serde(rename = "type")]
    pub category: LogCategory,

    /// Optional structured payload (or a string that may itself hold JSON)
    #[serde(default)]
    pub details: Option<Value>,

    /// Hex digest of the prior entry's chain state; empty for the first entry
    #[serde(default)]
    pub previous_hash: String,

    /// Hex digest over `previous_hash` and this entry's canonical content
    ///
    /// Empty for legacy entries produced before hashing was introduced.
    #[serde(default)]
    pub current_hash: String,
}

impl LogEntry {
    /// Create an unhashed entry
    ///
    /// The hash fields are filled in by the chain when the entry is appended.
    pub fn new(
        id: u64,
        timestamp: impl Into<String>,
        message: impl Into<String>,
        category: LogCategory,
    ) -> Self {
        Self {
            id: EntryId::Counter(id),
            sequence_number: None,
            timestamp: timestamp.into(),
            message: message.into(),
            category,
            details: None,
            previous_hash: String::new(),
            current_hash: String::new(),
        }
    }

    /// Replace the identifier, e.g. with a composite string key
    pub fn with_id(mut self, id: impl Into<EntryId>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach a structured payload
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether this entry carries any hash fields at all
    pub fn has_hash_fields(&self) -> bool {
        !self.previous_hash.is_empty() || !self.current_hash.is_empty()
    }
}
