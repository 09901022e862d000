//! Outcome inference strategies
//!
//! Each strategy scans the whole log and either commits to an outcome or yields to
//! the next one. Order is significant: explicit structured reports always beat the
//! keyword heuristic.

use crate::ParserConfig;
use agentproof_domain::{Confidence, LogEntry, Outcome, OutcomeResult};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// What a strategy concluded about a log
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The strategy determined an outcome
    Match(OutcomeResult),
    /// The strategy saw signal but could not decide
    Inconclusive(String),
    /// The strategy found nothing to work with
    NoSignal,
}

/// One step in the ordered inference pipeline
pub trait OutcomeStrategy: Send + Sync {
    /// Short stable name, for diagnostics
    fn name(&self) -> &'static str;

    /// Evaluate the full log
    fn evaluate(&self, logs: &[LogEntry]) -> Evaluation;
}

/// Explicit `outcome` field inside entry details
#[derive(Debug, Default)]
pub struct StructuredDetails;

impl OutcomeStrategy for StructuredDetails {
    fn name(&self) -> &'static str {
        "structured_details"
    }

    fn evaluate(&self, logs: &[LogEntry]) -> Evaluation {
        logs.iter()
            .filter_map(|entry| entry.details.as_ref())
            .find_map(|details| match details {
                Value::Object(map) => structured_outcome(map),
                Value::String(text) => structured_from_text(text),
                _ => None,
            })
            .map(|(outcome, reason)| {
                Evaluation::Match(OutcomeResult::matched(
                    outcome,
                    Confidence::High,
                    reason.unwrap_or_else(|| "Structured outcome found in log details".to_string()),
                ))
            })
            .unwrap_or(Evaluation::NoSignal)
    }
}

/// JSON object with an `outcome` field embedded in the message text
#[derive(Debug, Default)]
pub struct StructuredMessage;

impl OutcomeStrategy for StructuredMessage {
    fn name(&self) -> &'static str {
        "structured_message"
    }

    fn evaluate(&self, logs: &[LogEntry]) -> Evaluation {
        logs.iter()
            .find_map(|entry| structured_from_text(&entry.message))
            .map(|(outcome, reason)| {
                Evaluation::Match(OutcomeResult::matched(
                    outcome,
                    Confidence::High,
                    reason.unwrap_or_else(|| "Structured outcome found in log message".to_string()),
                ))
            })
            .unwrap_or(Evaluation::NoSignal)
    }
}

/// Whole-word keyword counting across messages and details
#[derive(Debug)]
pub struct Keyword {
    yes: HashSet<String>,
    no: HashSet<String>,
    medium_count: usize,
}

impl Keyword {
    /// Build from configured keyword sets
    pub fn new(config: &ParserConfig) -> Self {
        let upper = |words: &[String]| -> HashSet<String> {
            words.iter().map(|w| w.to_uppercase()).collect()
        };
        Self {
            yes: upper(&config.yes_keywords),
            no: upper(&config.no_keywords),
            medium_count: config.medium_confidence_count,
        }
    }

    /// Count (yes, no) whole-word hits in a piece of text
    pub fn count(&self, text: &str) -> (usize, usize) {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_uppercase)
            .fold((0, 0), |(yes, no), word| {
                (
                    yes + usize::from(self.yes.contains(&word)),
                    no + usize::from(self.no.contains(&word)),
                )
            })
    }
}

impl OutcomeStrategy for Keyword {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn evaluate(&self, logs: &[LogEntry]) -> Evaluation {
        let (yes, no) = logs.iter().fold((0, 0), |(yes, no), entry| {
            let (y1, n1) = self.count(&entry.message);
            let (y2, n2) = entry
                .details
                .as_ref()
                .map(|details| self.count(&details.to_string()))
                .unwrap_or((0, 0));
            (yes + y1 + y2, no + n1 + n2)
        });

        if yes == 0 && no == 0 {
            return Evaluation::NoSignal;
        }
        if yes == no {
            return Evaluation::Inconclusive(format!(
                "Keyword signals tied ({} yes, {} no)",
                yes, no
            ));
        }

        let (outcome, winning) = if yes > no {
            (Outcome::Yes, yes)
        } else {
            (Outcome::No, no)
        };
        let confidence = if winning >= self.medium_count {
            Confidence::Medium
        } else {
            Confidence::Low
        };
        Evaluation::Match(OutcomeResult::matched(
            outcome,
            confidence,
            format!("Keyword analysis: {} yes signals vs {} no signals", yes, no),
        ))
    }
}

/// Parse text that may hold a JSON object, possibly fenced in markdown
fn structured_from_text(text: &str) -> Option<(Outcome, Option<String>)> {
    let json = extract_json(text)?;
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => structured_outcome(&map),
        _ => None,
    }
}

/// Strip a surrounding markdown code fence, if any
///
/// Returns `None` for text that cannot be a JSON object, so plain prose is skipped
/// without a parse attempt.
pub fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let body = if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string ("json") on the opening fence line
        let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
    } else {
        trimmed
    };
    body.starts_with('{').then_some(body)
}

fn structured_outcome(map: &Map<String, Value>) -> Option<(Outcome, Option<String>)> {
    let outcome = match map.get("outcome")? {
        Value::String(token) => Outcome::normalize(token),
        Value::Bool(true) => Some(Outcome::Yes),
        Value::Bool(false) => Some(Outcome::No),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(Outcome::Yes),
            Some(v) if v == 0.0 => Some(Outcome::No),
            _ => None,
        },
        _ => None,
    }?;
    let reason = map
        .get("reason")
        .and_then(Value::as_str)
        .filter(|r| !r.trim().is_empty())
        .map(str::to_string);
    Some((outcome, reason))
}
