//! Human-readable output for ingestion runs.
//!
//! Plain text only. Color/terminal formatting belongs to the CLI layer.

use std::io::Write;
use std::path::Path;

use crate::error::IngestError;
use crate::report::IngestReport;

/// Announce the start of a run.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_start(path: &Path, writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(writer, "Starting validation for file: {}", path.display())
}

/// Describe a successful run.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_success(report: &IngestReport, writer: &mut dyn Write) -> std::io::Result<()> {
    let noun = if report.top_level_keys == 1 {
        "key"
    } else {
        "keys"
    };
    writeln!(writer, "Inferred configuration type: {}", report.format)?;
    writeln!(
        writer,
        "Successfully parsed configuration file with {} top-level {noun}.",
        report.top_level_keys
    )?;
    writeln!(
        writer,
        "No custom validation rules are configured; only syntax was checked."
    )
}

/// Describe a failed run.
///
/// The failure itself is one line. When the format was already inferred
/// (a parse failure), the inferred type is reported first.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_failure(error: &IngestError, writer: &mut dyn Write) -> std::io::Result<()> {
    if let Some(format) = error.format() {
        writeln!(writer, "Inferred configuration type: {format}")?;
    }
    // Decoder diagnostics may span several lines.
    let message = error.to_string();
    let message = message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "Validation Failed: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ConfigFormat;
    use crate::normalized::{ConfigValue, NormalizedConfig};
    use crate::parse::ParseError;
    use std::path::PathBuf;

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        let writer: &mut dyn Write = &mut buf;
        f(writer).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_success() {
        let config: NormalizedConfig = [
            ("a", ConfigValue::Integer(1)),
            ("b", ConfigValue::Integer(2)),
        ]
        .into_iter()
        .collect();
        let report = IngestReport::new(PathBuf::from("data.json"), ConfigFormat::Json, 13, config);
        let text = render(|w| write_success(&report, w));
        assert!(text.contains("Inferred configuration type: JSON"));
        assert!(text.contains("with 2 top-level keys."));
    }

    #[test]
    fn test_write_success_singular() {
        let config: NormalizedConfig = [("a", ConfigValue::Integer(1))].into_iter().collect();
        let report = IngestReport::new(PathBuf::from("a.yaml"), ConfigFormat::Yaml, 5, config);
        let text = render(|w| write_success(&report, w));
        assert!(text.contains("with 1 top-level key."), "got: {text}");
    }

    #[test]
    fn test_write_failure_is_single_line() {
        let err = IngestError::NotFound {
            path: PathBuf::from("missing.yaml"),
        };
        let text = render(|w| write_failure(&err, w));
        assert_eq!(
            text,
            "Validation Failed: file not found at path: missing.yaml\n"
        );
    }

    #[test]
    fn test_write_failure_names_inferred_format_on_parse_error() {
        let err = IngestError::Parse {
            path: PathBuf::from("bad.yaml"),
            format: ConfigFormat::Yaml,
            source: ParseError::NonScalarKey { line: 1, column: 1 },
        };
        let text = render(|w| write_failure(&err, w));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2, "got: {text}");
        assert_eq!(lines[0], "Inferred configuration type: YAML");
        assert!(lines[1].starts_with("Validation Failed: parsing error in bad.yaml"));
    }

    #[test]
    fn test_write_start() {
        let text = render(|w| write_start(Path::new("config.yaml"), w));
        assert_eq!(text, "Starting validation for file: config.yaml\n");
    }
}
