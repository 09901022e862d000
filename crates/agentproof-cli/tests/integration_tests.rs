//! Integration tests for the CLI library: proof files in, reports out

use agentproof_chain::{ChainVerifier, LogStore, ProofSigner};
use agentproof_cli::cli::{Cli, Command, ResolveArgs};
use agentproof_cli::commands::resolve::dry_run;
use agentproof_cli::commands::verify::check_status;
use agentproof_cli::config::OutputFormat;
use agentproof_cli::input::load_package;
use agentproof_cli::{CliError, Config, Formatter};
use agentproof_domain::{LogCategory, Outcome, ProofPackage};
use agentproof_resolver::ResolverConfig;
use clap::Parser;
use serde_json::json;
use std::fs;
use std::path::Path;

fn signed_package() -> ProofPackage {
    let mut store = LogStore::new();
    store.append("Scanning", LogCategory::System, None, "2025-01-01T00:00:00.000Z");
    store.append(
        "Placed order",
        LogCategory::ToolUse,
        Some(json!({"market": "eth-5k", "side": "no"})),
        "2025-01-01T00:00:01.000Z",
    );
    store.append(
        "Result",
        LogCategory::Public,
        Some(json!({"outcome": false})),
        "2025-01-01T00:00:02.000Z",
    );
    ProofSigner::from_seed(&[21u8; 32]).build_package(store.entries())
}

fn write_package(dir: &Path, package: &ProofPackage) -> String {
    let path = dir.join("proof.json");
    fs::write(&path, serde_json::to_string_pretty(package).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_verify_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_package(dir.path(), &signed_package());

    let package = load_package(&path).unwrap();
    let verification = ChainVerifier::new().verify_package(&package);
    assert!(verification.valid);
    assert!(check_status(&verification, true).is_ok());

    let report = Formatter::new(OutputFormat::Table, false)
        .format_verification(&verification)
        .unwrap();
    assert!(report.starts_with("VERIFIED"));
}

#[test]
fn test_edited_file_fails_verification() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_package(dir.path(), &signed_package());

    // Edit the saved proof the way a careless or malicious host might
    let edited = fs::read_to_string(&path)
        .unwrap()
        .replace("Placed order", "Placed order (revised)");
    fs::write(&path, edited).unwrap();

    let package = load_package(&path).unwrap();
    let verification = ChainVerifier::new().verify_package(&package);
    assert!(!verification.valid);
    assert!(verification.errors[0].starts_with("Entry 1"));
    assert!(matches!(
        check_status(&verification, false),
        Err(CliError::Rejected(_))
    ));

    let report = Formatter::new(OutputFormat::Quiet, false)
        .format_verification(&verification)
        .unwrap();
    assert_eq!(report, "VERIFICATION FAILED");
}

#[tokio::test]
async fn test_resolve_dry_run_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let package = signed_package();
    let root = package.chain_root_hash.clone();
    let path = write_package(dir.path(), &package);

    let cli = Cli::try_parse_from(["agentproof", "resolve", path.as_str(), "--market", "eth-5k"])
        .unwrap();
    let mut args: ResolveArgs = match cli.command {
        Command::Resolve(args) => args,
        _ => panic!("Expected Resolve command"),
    };
    args.log_root = root;

    let package = load_package(&args.file).unwrap();
    let resolution = dry_run(&args, &ResolverConfig::default(), package)
        .await
        .unwrap();
    assert_eq!(resolution.outcome, Outcome::No);
    assert!(resolution.warnings.is_empty());
}

#[tokio::test]
async fn test_resolve_rejects_wrong_committed_root() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_package(dir.path(), &signed_package());

    let args = ResolveArgs {
        file: path,
        market: "eth-5k".to_string(),
        agent: "local-agent".to_string(),
        log_root: Some("00".repeat(32)),
        min_confidence: None,
        allow_unsigned: false,
    };
    let package = load_package(&args.file).unwrap();
    let err = dry_run(&args, &ResolverConfig::default(), package)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Committed log root"));
}

#[test]
fn test_config_file_drives_parser() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
timeout_secs = 5

[settings]
format = "json"

[resolver]
min_confidence = "medium"

[resolver.parser]
keyword_fallback = false
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.settings.format, OutputFormat::Json);
    assert!(!config.resolver.parser.keyword_fallback);
    assert!(config.resolver.require_signature);
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(CliError::Io(_))));
}
