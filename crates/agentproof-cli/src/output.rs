//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use agentproof_chain::{ChainVerification, VerificationStatus};
use agentproof_domain::{LogEntry, OutcomeResult};
use agentproof_resolver::Resolution;
use agentproof_validator::ValidationResult;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const MESSAGE_WIDTH: usize = 60;
const HASH_PREFIX: usize = 12;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a chain verification report.
    pub fn format_verification(&self, verification: &ChainVerification) -> Result<String> {
        let status = verification.status();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "status": status,
                "verification": verification,
            }))?),
            OutputFormat::Quiet => Ok(status_label(status).to_string()),
            OutputFormat::Table => {
                let mut lines = vec![self.status_banner(status)];

                let mut builder = Builder::default();
                builder.push_record(["Check", "Result"]);
                builder.push_record(["Hash chain", pass_fail(verification.integrity_valid)]);
                if verification.signed {
                    builder.push_record(["Root hash", pass_fail(verification.root_matches)]);
                    builder.push_record(["Signature", pass_fail(verification.signature_valid)]);
                } else {
                    builder.push_record(["Root hash", "not signed"]);
                    builder.push_record(["Signature", "not signed"]);
                }
                builder.push_record(["Computed root", verification.computed_root.as_str()]);
                lines.push(styled(builder));

                for error in &verification.errors {
                    lines.push(self.error(error));
                }
                for warning in &verification.warnings {
                    lines.push(self.warning(warning));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format log entries.
    pub fn format_entries(&self, entries: &[LogEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.current_hash.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No log entries.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Timestamp", "Type", "Message", "Hash"]);
                for entry in entries {
                    builder.push_record([
                        entry.id.to_string(),
                        entry.timestamp.clone(),
                        entry.category.to_string(),
                        truncate(&entry.message, MESSAGE_WIDTH),
                        truncate(&entry.current_hash, HASH_PREFIX),
                    ]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format a structural validation result.
    pub fn format_validation(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "valid": result.valid,
                "error": result.error,
            }))?),
            OutputFormat::Quiet => Ok(if result.valid { "valid" } else { "invalid" }.to_string()),
            OutputFormat::Table => Ok(match &result.error {
                None => self.success("Proof structure is valid"),
                Some(error) => self.error(error),
            }),
        }
    }

    /// Format an inferred outcome.
    pub fn format_outcome(&self, result: &OutcomeResult) -> Result<String> {
        let outcome = result.outcome.map(|o| o.to_string());
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(outcome.unwrap_or_else(|| "none".to_string())),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Outcome", "Confidence", "Reason"]);
                builder.push_record([
                    outcome.unwrap_or_else(|| "-".to_string()),
                    result.confidence.to_string(),
                    result.reason.clone(),
                ]);
                Ok(styled(builder))
            }
        }
    }

    /// Format a resolution produced by a dry run.
    pub fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(resolution)?),
            OutputFormat::Quiet => Ok(resolution.outcome.to_string()),
            OutputFormat::Table => {
                let mut lines = vec![self.success(&format!(
                    "Market would resolve {} ({} confidence)",
                    resolution.outcome.as_str().to_uppercase(),
                    resolution.confidence
                ))];
                lines.push(self.info(&resolution.reason));
                for warning in &resolution.warnings {
                    lines.push(self.warning(warning));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a freshly generated key pair.
    pub fn format_keypair(&self, public_key: &str, seed_hex: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "public_key": public_key,
                "signing_key": seed_hex,
            }))?),
            OutputFormat::Quiet => Ok(seed_hex.to_string()),
            OutputFormat::Table => Ok([
                self.success("Generated Ed25519 signing key"),
                format!("public_key  = {}", public_key),
                format!("signing_key = {}", seed_hex),
                self.warning("Keep signing_key secret; it goes in the agent config"),
            ]
            .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn status_banner(&self, status: VerificationStatus) -> String {
        let label = status_label(status);
        if !self.color_enabled {
            return label.to_string();
        }
        match status {
            VerificationStatus::Verified => label.green().bold().to_string(),
            VerificationStatus::Unverified => label.yellow().bold().to_string(),
            VerificationStatus::Failed => label.red().bold().to_string(),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Display label for a verification status.
pub fn status_label(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Verified => "VERIFIED",
        VerificationStatus::Unverified => "UNVERIFIED",
        VerificationStatus::Failed => "VERIFICATION FAILED",
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "pass"
    } else {
        "FAIL"
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
