//! Command dispatch: turns verdicts into stderr lines and exit codes.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use npv_validate::{
    FsTree, RunOutcome, has_failures, validate_data_dir, validate_run_path,
    write_run_report_json,
};

/// Validates a single run root. Returns the process exit code.
pub fn run_single(directory: &Path, report_json: Option<&Path>) -> Result<i32> {
    let span = info_span!("validate", root = %directory.display());
    let _guard = span.enter();

    let result = validate_run_path(directory);

    if let Some(report_path) = report_json {
        let outcome = RunOutcome {
            path: directory.to_path_buf(),
            result: result.clone(),
        };
        write_run_report_json(report_path, directory, std::slice::from_ref(&outcome))
            .context("write run report")?;
        info!(report = %report_path.display(), "wrote run report");
    }

    if result.success {
        debug!("run directory ok");
        Ok(0)
    } else {
        eprintln!(
            "Failed to validate directory {}: {}",
            directory.display(),
            result.reason
        );
        Ok(1)
    }
}

/// Validates every run under a data directory. Returns the exit code.
///
/// Failures are reported per subdirectory without aborting the batch;
/// ignored names are skipped entirely.
pub fn run_batch(
    directory: &Path,
    ignore: &BTreeSet<String>,
    report_json: Option<&Path>,
) -> Result<i32> {
    if !directory.is_dir() {
        eprintln!("{} is not a directory, exiting now", directory.display());
        return Ok(1);
    }

    let span = info_span!("batch", datadir = %directory.display());
    let _guard = span.enter();

    let outcomes = validate_data_dir(&FsTree, directory, ignore)?;
    for outcome in &outcomes {
        if !outcome.result.success {
            eprintln!("[{}] error: {}", outcome.path.display(), outcome.result.reason);
        }
    }

    if let Some(report_path) = report_json {
        write_run_report_json(report_path, directory, &outcomes)
            .context("write run report")?;
        info!(report = %report_path.display(), "wrote run report");
    }

    Ok(if has_failures(&outcomes) { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn populate(root: &Path, files: &[&str]) {
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().expect("parent")).expect("create parents");
            fs::write(&path, b"x").expect("write file");
        }
    }

    #[test]
    fn test_run_single_valid_exits_zero() {
        let dir = TempDir::new().expect("temp dir");
        populate(
            dir.path(),
            &[
                "sample_a/sub1/fastq_pass/a.fastq",
                "sample_a/sub1/fast5_pass/a.fast5",
            ],
        );
        let code = run_single(dir.path(), None).expect("run single");
        assert_eq!(code, 0);
    }

    #[test]
    fn test_run_single_invalid_exits_one() {
        let dir = TempDir::new().expect("temp dir");
        let code = run_single(&dir.path().join("missing"), None).expect("run single");
        assert_eq!(code, 1);
    }

    #[test]
    fn test_run_batch_mixed_exits_one() {
        let dir = TempDir::new().expect("temp dir");
        populate(
            dir.path(),
            &[
                "run1/sample_a/sub1/fastq_pass/a.fastq",
                "run1/sample_a/sub1/fast5_pass/a.fast5",
            ],
        );
        fs::create_dir_all(dir.path().join("run2")).expect("create run2");
        let code = run_batch(dir.path(), &BTreeSet::new(), None).expect("run batch");
        assert_eq!(code, 1);
    }

    #[test]
    fn test_run_batch_ignores_named_subdirs() {
        let dir = TempDir::new().expect("temp dir");
        populate(
            dir.path(),
            &[
                "run1/sample_a/sub1/fastq_pass/a.fastq",
                "run1/sample_a/sub1/fast5_pass/a.fast5",
            ],
        );
        fs::create_dir_all(dir.path().join("skipme")).expect("create skipme");
        let ignore: BTreeSet<String> = ["skipme".to_string()].into_iter().collect();
        let code = run_batch(dir.path(), &ignore, None).expect("run batch");
        assert_eq!(code, 0);
    }

    #[test]
    fn test_run_batch_on_file_exits_one() {
        let dir = TempDir::new().expect("temp dir");
        let file = dir.path().join("data");
        fs::write(&file, b"x").expect("write file");
        let code = run_batch(&file, &BTreeSet::new(), None).expect("run batch");
        assert_eq!(code, 1);
    }

    #[test]
    fn test_report_json_written_in_batch_mode() {
        let dir = TempDir::new().expect("temp dir");
        populate(
            dir.path(),
            &[
                "run1/sample_a/sub1/fastq_pass/a.fastq",
                "run1/sample_a/sub1/fast5_pass/a.fast5",
            ],
        );
        let report = dir.path().join("report.json");
        let code = run_batch(dir.path(), &BTreeSet::new(), Some(&report)).expect("run batch");
        assert_eq!(code, 0);
        assert!(report.is_file());
    }
}
