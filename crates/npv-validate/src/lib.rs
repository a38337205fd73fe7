//! Nanopore run directory validation.
//!
//! A run root is expected to contain sample directories, each containing
//! subrun directories, each containing `fastq_pass` and `fast5_pass` leaf
//! directories whose files pair up by basename. This crate checks that
//! layout as a pre-flight step before downstream pipelines consume the
//! run, catching incomplete transfers and mismatched file pairs early.
//!
//! Validation is read-only and reports layout violations as
//! [`ValidationResult`] values rather than errors, so verdicts compose
//! freely in batch mode.

pub mod batch;
pub mod error;
pub mod report;
pub mod run;
pub mod tree;
pub mod verdict;

pub use batch::{RunOutcome, has_failures, validate_data_dir};
pub use error::{Result, ValidateError};
pub use report::{RunReportEntry, RunReportPayload, write_run_report_json};
pub use run::{FAST5_PASS, FASTQ_PASS, validate_run, validate_run_path};
pub use tree::{DirTree, FsTree, MemTree, TreeEntry};
pub use verdict::ValidationResult;
