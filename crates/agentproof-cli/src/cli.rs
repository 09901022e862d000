//! CLI command definitions and argument parsing.

use agentproof_domain::Confidence;
use clap::{Parser, Subcommand};

/// agentproof CLI - Verify agent log proofs and resolve markets from them.
#[derive(Debug, Parser)]
#[command(name = "agentproof")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.agentproof/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (status only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a proof package's hash chain, root and signature
    Verify(VerifyArgs),

    /// Check a proof package's structure without verifying hashes
    Validate(ValidateArgs),

    /// Infer the market outcome from a proof's log entries
    Outcome(OutcomeArgs),

    /// Fetch a proof from an agent endpoint or published URI
    Fetch(FetchArgs),

    /// Dry-run the full resolution flow against a local proof file
    Resolve(ResolveArgs),

    /// Generate an agent signing key
    Keygen,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Proof package JSON file ("-" for stdin)
    pub file: String,

    /// Treat an unsigned proof as a failure
    #[arg(long)]
    pub strict: bool,

    /// Also print the log entries
    #[arg(short, long)]
    pub logs: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Proof package JSON file ("-" for stdin)
    pub file: String,

    /// Require signing fields and per-entry hashes
    #[arg(long)]
    pub strict: bool,

    /// Maximum number of log entries
    #[arg(long)]
    pub max_logs: Option<usize>,
}

/// Arguments for the outcome command.
#[derive(Debug, Parser)]
pub struct OutcomeArgs {
    /// Proof package or log array JSON file ("-" for stdin)
    pub file: String,

    /// Ignore free-text keyword signals
    #[arg(long)]
    pub structured_only: bool,
}

/// Arguments for the fetch command.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Agent base URL, or a published proof URI when no market is given
    pub url: String,

    /// Market ID to request from the agent's proof endpoint
    #[arg(short, long)]
    pub market: Option<String>,

    /// Payment token sent as `Authorization: Signature <token>`
    #[arg(short, long, env = "AGENTPROOF_PAYMENT_TOKEN")]
    pub token: Option<String>,

    /// Write the fetched package to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Proof package JSON file ("-" for stdin)
    pub file: String,

    /// Market ID to resolve
    #[arg(short, long)]
    pub market: String,

    /// Agent address recorded on the proof request
    #[arg(short, long, default_value = "local-agent")]
    pub agent: String,

    /// Root hash the agent committed on-chain
    #[arg(long)]
    pub log_root: Option<String>,

    /// Lowest confidence accepted
    #[arg(long, value_enum)]
    pub min_confidence: Option<ConfidenceArg>,

    /// Accept unsigned proofs (integrity still checked)
    #[arg(long)]
    pub allow_unsigned: bool,
}

/// Confidence argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ConfidenceArg {
    /// Any determined outcome
    Low,
    /// Repeated or structured signal
    Medium,
    /// Explicit structured declaration only
    High,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ConfidenceArg> for Confidence {
    fn from(confidence: ConfidenceArg) -> Self {
        match confidence {
            ConfidenceArg::Low => Confidence::Low,
            ConfidenceArg::Medium => Confidence::Medium,
            ConfidenceArg::High => Confidence::High,
        }
    }
}
