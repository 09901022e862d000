//! Reading proof packages from files and stdin.

use crate::error::{CliError, Result};
use agentproof_domain::{LogEntry, ProofPackage};
use serde_json::Value;
use std::fs;
use std::io::Read;

/// Read a file, or stdin when `path` is "-".
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Parse a proof package, accepting a bare array of entries as an unsigned package.
pub fn parse_package(text: &str) -> Result<ProofPackage> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(_) => {
            let logs: Vec<LogEntry> = serde_json::from_value(value)?;
            Ok(ProofPackage::unsigned(logs))
        }
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Err(CliError::InvalidInput(
            "expected a proof package object or an array of log entries".to_string(),
        )),
    }
}

/// Read and parse a proof package from a file or stdin.
pub fn load_package(path: &str) -> Result<ProofPackage> {
    parse_package(&read_input(path)?)
}
