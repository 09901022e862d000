//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use crate::input::load_package;
use crate::output::Formatter;
use agentproof_validator::{ProofValidator, ValidationConfig};

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, formatter: &Formatter) -> Result<()> {
    let package = load_package(&args.file)?;
    let validator = ProofValidator::new(validation_config(&args)?);

    let result = validator.validate_proof_structure(&package);
    println!("{}", formatter.format_validation(&result)?);

    match result.error {
        None => Ok(()),
        Some(error) => Err(CliError::Rejected(error)),
    }
}

fn validation_config(args: &ValidateArgs) -> Result<ValidationConfig> {
    let mut config = if args.strict {
        ValidationConfig::strict()
    } else {
        ValidationConfig::permissive()
    };
    if let Some(max_logs) = args.max_logs {
        if max_logs == 0 {
            return Err(CliError::InvalidInput(
                "--max-logs must be greater than 0".to_string(),
            ));
        }
        config.max_logs = Some(max_logs);
    }
    Ok(config)
}
