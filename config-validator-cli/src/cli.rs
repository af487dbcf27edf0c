use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use config_validator::{DEFAULT_MAX_FILE_SIZE, IngestConfig, output, run_with_config};

use crate::logging;

/// Exit status after a failed validation run.
const EXIT_VALIDATION_FAILED: i32 = 1;

/// A CLI tool to validate infrastructure configuration files (YAML/JSON).
#[derive(Parser, Debug)]
#[command(name = "config-validator", version, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); `RUST_LOG` overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a YAML or JSON configuration file and report its top-level structure
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the YAML or JSON configuration file to validate
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub file: String,

    /// Refuse files larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,
}

/// Parse arguments, initialise logging and execute the requested command.
///
/// Returns the process exit status.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Execute a parsed command line, writing the report to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    match &cli.command {
        Some(Commands::Validate(args)) => validate(args, out),
        None => {
            write!(out, "{}", Cli::command().render_help())?;
            Ok(0)
        }
    }
}

fn validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<i32> {
    let path = Path::new(&args.file);
    let mut config = IngestConfig::default();
    config.max_file_size = args.max_file_size;

    output::write_start(path, out)?;
    match run_with_config(path, &config) {
        Ok(report) => {
            output::write_success(&report, out)?;
            Ok(0)
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), stage = %err.stage(), "validation failed");
            output::write_failure(&err, out)?;
            Ok(EXIT_VALIDATION_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn execute_args(args: &[&str]) -> (i32, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut buf = Vec::new();
        let code = execute(&cli, &mut buf).unwrap();
        (code, String::from_utf8(buf).unwrap())
    }

    fn validate_path(path: &Path) -> (i32, String) {
        execute_args(&["config-validator", "validate", "-f", path.to_str().unwrap()])
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_flag_short_and_long() {
        let cli = Cli::try_parse_from(["config-validator", "validate", "-f", "a.yaml"]).unwrap();
        let Some(Commands::Validate(args)) = cli.command else {
            panic!("expected validate subcommand");
        };
        assert_eq!(args.file, "a.yaml");
        assert_eq!(args.max_file_size, DEFAULT_MAX_FILE_SIZE);

        let cli =
            Cli::try_parse_from(["config-validator", "validate", "--file", "b.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Validate(ref a)) if a.file == "b.json"));
    }

    #[test]
    fn test_file_flag_required() {
        let err = Cli::try_parse_from(["config-validator", "validate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_file_flag_rejects_empty_value() {
        let err = Cli::try_parse_from(["config-validator", "validate", "-f", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        let result = Cli::try_parse_from(["config-validator", "validate", "config.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand_prints_help() {
        let (code, text) = execute_args(&["config-validator"]);
        assert_eq!(code, 0);
        assert!(text.contains("validate"), "got: {text}");
    }

    #[test]
    fn test_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.yaml");
        let (code, text) = validate_path(&path);
        assert_ne!(code, 0);
        assert!(
            text.starts_with("Starting validation for file:"),
            "got: {text}"
        );
        assert!(text.contains("Validation Failed: file not found"), "got: {text}");
    }

    #[test]
    fn test_unsupported_extension_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("service.tf");
        fs::write(&path, "variable \"region\" {}\n").unwrap();
        let (code, text) = validate_path(&path);
        assert_ne!(code, 0);
        assert!(text.contains("unsupported file extension"), "got: {text}");
    }

    #[test]
    fn test_valid_yaml_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "service: api-gateway\nport: 8080\nenabled: true").unwrap();
        let (code, text) = validate_path(&path);
        assert_eq!(code, 0, "got: {text}");
        assert!(text.contains("Inferred configuration type: YAML"));
        assert!(text.contains("with 3 top-level keys."));
    }

    #[test]
    fn test_valid_json_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, r#"{"a":1,"b":2}"#).unwrap();
        let (code, text) = validate_path(&path);
        assert_eq!(code, 0, "got: {text}");
        assert!(text.contains("Inferred configuration type: JSON"));
        assert!(text.contains("with 2 top-level keys."));
    }

    #[test]
    fn test_parse_error_reports_format_then_one_failure_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "bad-yaml: [").unwrap();
        let (code, text) = validate_path(&path);
        assert_eq!(code, EXIT_VALIDATION_FAILED);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3, "got: {text}");
        assert_eq!(lines[1], "Inferred configuration type: YAML");
        assert!(lines[2].starts_with("Validation Failed"), "got: {text}");
    }

    #[test]
    fn test_access_failure_has_no_inferred_type() {
        let tmp = TempDir::new().unwrap();
        let (_, text) = validate_path(&tmp.path().join("missing.json"));
        assert!(!text.contains("Inferred configuration type"), "got: {text}");
    }

    #[test]
    fn test_max_file_size_flag() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, r#"{"a":1,"b":2}"#).unwrap();
        let (code, text) = execute_args(&[
            "config-validator",
            "validate",
            "-f",
            path.to_str().unwrap(),
            "--max-file-size",
            "4",
        ]);
        assert_ne!(code, 0);
        assert!(
            text.contains("exceeds the maximum size of 4 bytes"),
            "got: {text}"
        );
    }

    #[test]
    fn test_verbose_is_global() {
        let cli =
            Cli::try_parse_from(["config-validator", "validate", "-vv", "-f", "a.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
