//! CLI argument definitions for npverify.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "npverify",
    version,
    about = "Verify nanopore run directory layout",
    long_about = "Verify that a nanopore sequencing run directory has the expected\n\
                  sample/subrun layout and that fastq_pass and fast5_pass hold\n\
                  basename-paired file sets.\n\n\
                  Intended as a pre-flight check before downstream pipelines\n\
                  consume the run. Success is silent; failures go to stderr."
)]
pub struct Cli {
    /// Directory to check - either a run directory or a directory with
    /// multiple runs (requires --datadir).
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Treat DIRECTORY as a directory with multiple runs to test.
    #[arg(long = "datadir")]
    pub datadir: bool,

    /// Comma-separated list of subdirectories to ignore, requires --datadir.
    #[arg(long = "ignore", value_name = "NAMES")]
    pub ignore: Option<String>,

    /// Write a JSON report of all run verdicts to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Returns the usage-error message for invalid flag combinations,
    /// checked before any filesystem access.
    pub fn usage_error(&self) -> Option<&'static str> {
        let ignore_given = self.ignore.as_deref().is_some_and(|names| !names.is_empty());
        if ignore_given && !self.datadir {
            return Some("--ignore requires --datadir argument, exiting now");
        }
        None
    }

    /// Parsed ignore list; empty when the flag is absent.
    pub fn ignore_names(&self) -> BTreeSet<String> {
        self.ignore
            .as_deref()
            .unwrap_or("")
            .trim()
            .split(',')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
