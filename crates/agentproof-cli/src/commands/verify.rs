//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::error::{CliError, Result};
use crate::input::load_package;
use crate::output::Formatter;
use agentproof_chain::{ChainVerification, ChainVerifier, VerificationStatus};

/// Execute the verify command.
pub fn execute_verify(args: VerifyArgs, formatter: &Formatter) -> Result<()> {
    let package = load_package(&args.file)?;

    if args.logs {
        println!("{}", formatter.format_entries(&package.logs)?);
    }

    let verification = ChainVerifier::new().verify_package(&package);
    println!("{}", formatter.format_verification(&verification)?);

    check_status(&verification, args.strict)
}

/// Map a verification to the command's exit status.
///
/// An unsigned but intact chain passes unless `strict` is set.
pub fn check_status(verification: &ChainVerification, strict: bool) -> Result<()> {
    match verification.status() {
        VerificationStatus::Verified => Ok(()),
        VerificationStatus::Unverified if !strict => Ok(()),
        VerificationStatus::Unverified => Err(CliError::Rejected("proof is unsigned".to_string())),
        VerificationStatus::Failed => Err(CliError::Rejected(format!(
            "{} verification error(s)",
            verification.errors.len()
        ))),
    }
}
