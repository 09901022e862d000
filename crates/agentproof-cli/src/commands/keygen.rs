//! Keygen command implementation.

use crate::error::Result;
use crate::output::Formatter;
use agentproof_chain::ProofSigner;

/// Execute the keygen command.
pub fn execute_keygen(formatter: &Formatter) -> Result<()> {
    let signer = ProofSigner::generate();
    println!(
        "{}",
        formatter.format_keypair(&signer.public_key(), &signer.seed_hex())?
    );
    Ok(())
}
