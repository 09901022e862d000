//! Ordered outcome inference over a log sequence

use crate::strategy::{Evaluation, Keyword, OutcomeStrategy, StructuredDetails, StructuredMessage};
use crate::ParserConfig;
use agentproof_domain::{LogEntry, OutcomeResult};
use tracing::debug;

/// Infers a binary outcome from an agent's log
///
/// Strategies run in order and the first match wins. Each strategy sees the whole
/// log before the next one runs, so a structured report anywhere beats keywords
/// everywhere.
pub struct OutcomeParser {
    strategies: Vec<Box<dyn OutcomeStrategy>>,
}

impl OutcomeParser {
    /// Parser with the default strategies and keyword sets
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    /// Parser built from configuration
    pub fn with_config(config: &ParserConfig) -> Self {
        let mut strategies: Vec<Box<dyn OutcomeStrategy>> =
            vec![Box::new(StructuredDetails), Box::new(StructuredMessage)];
        if config.keyword_fallback {
            strategies.push(Box::new(Keyword::new(config)));
        }
        Self { strategies }
    }

    /// Parser with a caller-supplied strategy list
    pub fn with_strategies(strategies: Vec<Box<dyn OutcomeStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategy names in evaluation order
    pub fn strategies(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Infer the outcome; never fails, returning an undetermined result instead
    pub fn parse_outcome_from_logs(&self, logs: &[LogEntry]) -> OutcomeResult {
        if logs.is_empty() {
            return OutcomeResult::undetermined("No logs to analyze");
        }

        let mut inconclusive = None;
        for strategy in &self.strategies {
            match strategy.evaluate(logs) {
                Evaluation::Match(result) => {
                    debug!(
                        strategy = strategy.name(),
                        confidence = %result.confidence,
                        "outcome inferred"
                    );
                    return result;
                }
                Evaluation::Inconclusive(reason) => {
                    debug!(strategy = strategy.name(), %reason, "strategy inconclusive");
                    inconclusive.get_or_insert(reason);
                }
                Evaluation::NoSignal => {}
            }
        }

        OutcomeResult::undetermined(
            inconclusive.unwrap_or_else(|| "No outcome signal found in logs".to_string()),
        )
    }
}

impl Default for OutcomeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutcomeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutcomeParser")
            .field("strategies", &self.strategies())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentproof_domain::{Confidence, LogCategory, Outcome};
    use serde_json::json;

    fn log(id: u64, message: &str) -> LogEntry {
        LogEntry::new(id, "2025-01-01T00:00:00.000Z", message, LogCategory::AgentSpeech)
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            OutcomeParser::new().strategies(),
            vec!["structured_details", "structured_message", "keyword"]
        );
        assert_eq!(
            OutcomeParser::with_config(&ParserConfig::structured_only()).strategies(),
            vec!["structured_details", "structured_message"]
        );
    }

    #[test]
    fn test_structured_beats_keywords() {
        let logs = vec![
            log(1, "scanning"),
            log(2, "waiting"),
            log(3, "report").with_details(json!({"outcome": "YES"})),
            log(4, "holding"),
            log(5, "SOLD"),
        ];
        let result = OutcomeParser::new().parse_outcome_from_logs(&logs);
        assert_eq!(result.outcome, Some(Outcome::Yes));
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_keyword_tie_is_null_low() {
        let logs = vec![log(1, "BOUGHT"), log(2, "SOLD")];
        let result = OutcomeParser::new().parse_outcome_from_logs(&logs);
        assert_eq!(result.outcome, None);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.reason.contains("tied"));
    }

    #[test]
    fn test_distinct_fallback_reasons() {
        let parser = OutcomeParser::new();
        let empty = parser.parse_outcome_from_logs(&[]);
        let silent = parser.parse_outcome_from_logs(&[log(1, "hello world")]);
        assert_eq!(empty.outcome, None);
        assert_eq!(silent.outcome, None);
        assert_ne!(empty.reason, silent.reason);
    }

    #[test]
    fn test_structured_only_ignores_keywords() {
        let parser = OutcomeParser::with_config(&ParserConfig::structured_only());
        let result = parser.parse_outcome_from_logs(&[log(1, "bought bought bought")]);
        assert!(!result.is_determined());
    }

    #[test]
    fn test_caller_supplied_strategy_order() {
        let keywords_first = OutcomeParser::with_strategies(vec![
            Box::new(Keyword::new(&ParserConfig::default())),
            Box::new(StructuredDetails),
        ]);
        assert_eq!(keywords_first.strategies(), vec!["keyword", "structured_details"]);

        let logs = vec![
            log(1, "report").with_details(json!({"outcome": "YES"})),
            log(2, "SOLD everything"),
            log(3, "sold the rest"),
        ];
        let result = keywords_first.parse_outcome_from_logs(&logs);
        assert_eq!(result.outcome, Some(Outcome::No));

        let default_order = OutcomeParser::new().parse_outcome_from_logs(&logs);
        assert_eq!(default_order.outcome, Some(Outcome::Yes));
    }

    #[test]
    fn test_empty_strategy_list_never_matches() {
        let parser = OutcomeParser::with_strategies(Vec::new());
        let result = parser.parse_outcome_from_logs(&[log(1, "bought")]);
        assert!(!result.is_determined());
        assert_eq!(result.reason, "No outcome signal found in logs");
    }

    #[test]
    fn test_custom_keywords() {
        let config = ParserConfig {
            yes_keywords: vec!["pump".into()],
            no_keywords: vec!["dump".into()],
            ..ParserConfig::default()
        };
        let result = OutcomeParser::with_config(&config)
            .parse_outcome_from_logs(&[log(1, "PUMP it"), log(2, "bought")]);
        assert_eq!(result.outcome, Some(Outcome::Yes));
        assert_eq!(result.confidence, Confidence::Low);
    }
}
