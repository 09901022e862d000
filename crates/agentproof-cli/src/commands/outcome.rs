//! Outcome command implementation.

use crate::cli::OutcomeArgs;
use crate::error::Result;
use crate::input::load_package;
use crate::output::Formatter;
use agentproof_parser::{OutcomeParser, ParserConfig};

/// Execute the outcome command.
pub fn execute_outcome(
    args: OutcomeArgs,
    parser_config: &ParserConfig,
    formatter: &Formatter,
) -> Result<()> {
    let package = load_package(&args.file)?;

    let mut parser_config = parser_config.clone();
    if args.structured_only {
        parser_config.keyword_fallback = false;
    }

    let result = OutcomeParser::with_config(&parser_config).parse_outcome_from_logs(&package.logs);
    println!("{}", formatter.format_outcome(&result)?);

    Ok(())
}
