//! agentproof Outcome Parser
//!
//! Infers a binary market outcome from an agent's log sequence.
//!
//! # Overview
//!
//! ```text
//! logs → structured_details → structured_message → keyword → OutcomeResult
//! ```
//!
//! Structured reports (`{"outcome": "YES"}` in details or message) give High
//! confidence. The keyword heuristic counts whole-word signals across the log and
//! gives Medium or Low. When nothing decides, the result carries no outcome and a
//! reason, never an error.
//!
//! # Example
//!
//! ```
//! use agentproof_domain::{LogCategory, LogEntry, Outcome};
//! use agentproof_parser::OutcomeParser;
//! use serde_json::json;
//!
//! let logs = vec![
//!     LogEntry::new(1, "2025-01-01T00:00:00.000Z", "done", LogCategory::Public)
//!         .with_details(json!({"outcome": "yes", "reason": "price target hit"})),
//! ];
//! let result = OutcomeParser::new().parse_outcome_from_logs(&logs);
//! assert_eq!(result.outcome, Some(Outcome::Yes));
//! ```

#![warn(missing_docs)]

mod config;
mod parser;
pub mod strategy;

pub use config::{ConfigError, ParserConfig};
pub use parser::OutcomeParser;
pub use strategy::{Evaluation, OutcomeStrategy};
