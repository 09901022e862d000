//! Market outcome and confidence tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary market outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The market statement resolved true
    Yes,
    /// The market statement resolved false
    No,
}

impl Outcome {
    /// Get the outcome name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Yes => "yes",
            Outcome::No => "no",
        }
    }

    /// Normalize a free-form token into an outcome
    ///
    /// `YES`/`Y`/`TRUE`/`1` map to yes and `NO`/`N`/`FALSE`/`0` to no, ignoring case and
    /// surrounding whitespace. Anything else is not an outcome.
    pub fn normalize(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "YES" | "Y" | "TRUE" | "1" => Some(Outcome::Yes),
            "NO" | "N" | "FALSE" | "0" => Some(Outcome::No),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse grading of how far an inferred outcome can be trusted
///
/// Ordered `Low < Medium < High` so callers can gate on a minimum tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Heuristic signal only; flag for review
    Low,
    /// Repeated heuristic signal
    Medium,
    /// The agent explicitly declared the outcome
    High,
}

impl Confidence {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence tier: {}", s))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of inferring an outcome from a log sequence
///
/// Produced fresh on every parse and never persisted here; the caller persists it
/// through the market resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeResult {
    /// The inferred outcome, or `None` when the log carries no reliable signal
    pub outcome: Option<Outcome>,

    /// How far the outcome can be trusted
    pub confidence: Confidence,

    /// Human-readable explanation
    pub reason: String,
}

impl OutcomeResult {
    /// A matched outcome
    pub fn matched(outcome: Outcome, confidence: Confidence, reason: impl Into<String>) -> Self {
        Self {
            outcome: Some(outcome),
            confidence,
            reason: reason.into(),
        }
    }

    /// No outcome could be determined
    pub fn undetermined(reason: impl Into<String>) -> Self {
        Self {
            outcome: None,
            confidence: Confidence::Low,
            reason: reason.into(),
        }
    }

    /// Whether an outcome was found
    pub fn is_determined(&self) -> bool {
        self.outcome.is_some()
    }
}
