//! # config-validator
//!
//! Ingestion and normalization of a single YAML or JSON configuration file.
//!
//! The pipeline verifies the path is accessible, reads the content once,
//! infers the format from the extension and decodes the content into a
//! [`NormalizedConfig`]: a mapping from top-level keys to
//! [`ConfigValue`]s, independent of the source syntax. It stops at the
//! first failure and reports it as a classified [`IngestError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use config_validator::{FailureKind, run};
//!
//! match run("deploy/config.yaml") {
//!     Ok(report) => println!("{} top-level keys", report.top_level_keys),
//!     Err(err) if err.kind() == FailureKind::NotFound => eprintln!("no such file"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

mod config;
mod error;
mod format;
mod fs;
mod normalized;
pub mod output;
mod parse;
mod pipeline;
mod report;

pub use config::{DEFAULT_MAX_FILE_SIZE, IngestConfig};
pub use error::{FailureKind, IngestError};
pub use format::{ConfigFormat, detect};
pub use fs::{read_file_bounded, verify};
pub use normalized::{ConfigValue, NormalizedConfig};
pub use parse::{ParseError, parse};
pub use pipeline::{Outcome, Stage, run, run_with_config};
pub use report::IngestReport;
