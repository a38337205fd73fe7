//! Run directory layout validation.
//!
//! Checks run in a fixed order and the first violation anywhere aborts
//! the whole call, including any samples not yet visited. Stopping at the
//! first failing sample is deliberate policy, kept for fidelity with the
//! instrument tooling this replaces; a collect-all-errors mode would be a
//! separate option, not a change to the default.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::tree::{DirTree, FsTree, TreeEntry};
use crate::verdict::ValidationResult;

/// Leaf directory holding basecalled read files.
pub const FASTQ_PASS: &str = "fastq_pass";

/// Leaf directory holding raw signal files.
pub const FAST5_PASS: &str = "fast5_pass";

/// Validates a single run directory on the real filesystem.
pub fn validate_run_path(root: &Path) -> ValidationResult {
    validate_run(&FsTree, root)
}

/// Validates the layout of a single run directory.
///
/// Expected layout: `root` holds sample directories, each sample holds
/// subrun directories, each subrun holds `fastq_pass` and `fast5_pass`
/// with basename-paired file sets. Read-only and stateless: repeated
/// calls on an unmodified tree return identical verdicts.
pub fn validate_run<T: DirTree>(tree: &T, root: &Path) -> ValidationResult {
    if !tree.exists(root) {
        return ValidationResult::fail("run directory does not exist");
    }
    if !tree.is_dir(root) {
        return ValidationResult::fail(format!("path {} is not a directory!", root.display()));
    }

    let children = match list_entries(tree, root) {
        Ok(children) => children,
        Err(result) => return result,
    };
    let samples: Vec<&TreeEntry> = children.iter().filter(|e| e.is_dir).collect();
    if samples.is_empty() {
        return ValidationResult::fail(format!(
            "did not find any sample directories in {}",
            root.display()
        ));
    }

    for sample in samples {
        debug!(sample = %sample.path.display(), "checking sample");
        let children = match list_entries(tree, &sample.path) {
            Ok(children) => children,
            Err(result) => return result,
        };
        let subruns: Vec<&TreeEntry> = children.iter().filter(|e| e.is_dir).collect();
        if subruns.is_empty() {
            return ValidationResult::fail(format!(
                "did not find any subrun directories in {}",
                sample.path.display()
            ));
        }

        for subrun in subruns {
            let result = check_subrun(tree, &subrun.path);
            if !result.success {
                return result;
            }
        }
    }

    ValidationResult::pass()
}

/// Checks one subrun: both leaf directories present, both non-empty, and
/// the two basename sets equal.
fn check_subrun<T: DirTree>(tree: &T, subrun: &Path) -> ValidationResult {
    debug!(subrun = %subrun.display(), "checking subrun");
    let children = match list_entries(tree, subrun) {
        Ok(children) => children,
        Err(result) => return result,
    };
    let has_dir = |name: &str| children.iter().any(|e| e.is_dir && e.name == name);
    if !has_dir(FASTQ_PASS) {
        return ValidationResult::fail(format!(
            "did not find fastq_pass in {}",
            subrun.display()
        ));
    }
    if !has_dir(FAST5_PASS) {
        return ValidationResult::fail(format!(
            "did not find fast5_pass in {}",
            subrun.display()
        ));
    }

    let fastq_dir = subrun.join(FASTQ_PASS);
    let fastq = match list_entries(tree, &fastq_dir) {
        Ok(entries) => entries,
        Err(result) => return result,
    };
    let fastq_names: Vec<&str> = fastq
        .iter()
        .map(|e| e.name.as_str())
        .filter(|name| is_fastq_name(name))
        .collect();
    if fastq_names.is_empty() {
        return ValidationResult::fail(format!(
            "Did not find any fastq files in {}",
            fastq_dir.display()
        ));
    }

    let fast5_dir = subrun.join(FAST5_PASS);
    let fast5 = match list_entries(tree, &fast5_dir) {
        Ok(entries) => entries,
        Err(result) => return result,
    };
    let fast5_names: Vec<&str> = fast5
        .iter()
        .map(|e| e.name.as_str())
        .filter(|name| is_fast5_name(name))
        .collect();
    if fast5_names.is_empty() {
        return ValidationResult::fail(format!(
            "Did not find any fast5 files in {}",
            fast5_dir.display()
        ));
    }

    let fastq_basenames: BTreeSet<&str> = fastq_names.iter().map(|name| basename(name)).collect();
    let fast5_basenames: BTreeSet<&str> = fast5_names.iter().map(|name| basename(name)).collect();
    if fastq_basenames != fast5_basenames {
        return ValidationResult::fail(format!(
            "files in fastq_pass and fast5_pass in {} did not match",
            subrun.display()
        ));
    }

    ValidationResult::pass()
}

/// Lists a directory, converting read errors (e.g. permission denial)
/// into a failing verdict with a generic path-qualified reason.
fn list_entries<T: DirTree>(
    tree: &T,
    path: &Path,
) -> std::result::Result<Vec<TreeEntry>, ValidationResult> {
    tree.list(path).map_err(|source| {
        ValidationResult::fail(format!(
            "failed to read directory {}: {source}",
            path.display()
        ))
    })
}

/// True for names like `a.fastq` or `a.fastq.gz`.
fn is_fastq_name(name: &str) -> bool {
    name.contains(".fastq")
}

/// True for names like `a.fast5`.
fn is_fast5_name(name: &str) -> bool {
    name.ends_with(".fast5")
}

/// The pairing key: everything before the first `.`.
///
/// Deliberately literal. A name carrying a dot before its real extension
/// (e.g. a read ID with an embedded dot) truncates at that first dot,
/// on both sides of the pairing.
fn basename(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemTree;

    /// A minimal tree that passes every check.
    fn valid_tree() -> MemTree {
        MemTree::new()
            .file("run/s1/sub1/fastq_pass/a.fastq")
            .file("run/s1/sub1/fastq_pass/b.fastq.gz")
            .file("run/s1/sub1/fast5_pass/a.fast5")
            .file("run/s1/sub1/fast5_pass/b.fast5")
    }

    #[test]
    fn test_missing_root() {
        let tree = MemTree::new();
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "run directory does not exist");
    }

    #[test]
    fn test_root_is_a_file() {
        let tree = MemTree::new().file("run");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "path run is not a directory!");
    }

    #[test]
    fn test_no_sample_directories() {
        let tree = MemTree::new().file("run/notes.txt");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "did not find any sample directories in run");
    }

    #[test]
    fn test_no_subrun_directories() {
        let tree = MemTree::new().file("run/s1/readme.txt");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "did not find any subrun directories in run/s1");
    }

    #[test]
    fn test_first_failing_sample_short_circuits() {
        // s1 has no subruns; s2 is broken in a different way, but s1 fails
        // first and s2 is never reported.
        let tree = MemTree::new()
            .file("run/s1/readme.txt")
            .dir("run/s2/sub1");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "did not find any subrun directories in run/s1");
    }

    #[test]
    fn test_missing_fastq_pass() {
        let tree = MemTree::new().file("run/s1/sub1/fast5_pass/a.fast5");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "did not find fastq_pass in run/s1/sub1");
    }

    #[test]
    fn test_missing_fast5_pass() {
        let tree = MemTree::new().file("run/s1/sub1/fastq_pass/a.fastq");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "did not find fast5_pass in run/s1/sub1");
    }

    #[test]
    fn test_fastq_pass_must_be_a_directory() {
        // An entry named fastq_pass that is a plain file does not count.
        let tree = MemTree::new()
            .file("run/s1/sub1/fastq_pass")
            .dir("run/s1/sub1/fast5_pass");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(result.reason, "did not find fastq_pass in run/s1/sub1");
    }

    #[test]
    fn test_empty_fastq_pass() {
        let tree = MemTree::new()
            .dir("run/s1/sub1/fastq_pass")
            .file("run/s1/sub1/fast5_pass/a.fast5");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(
            result.reason,
            "Did not find any fastq files in run/s1/sub1/fastq_pass"
        );
    }

    #[test]
    fn test_empty_fast5_pass() {
        let tree = MemTree::new()
            .file("run/s1/sub1/fastq_pass/a.fastq")
            .dir("run/s1/sub1/fast5_pass");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(
            result.reason,
            "Did not find any fast5 files in run/s1/sub1/fast5_pass"
        );
    }

    #[test]
    fn test_non_matching_names_do_not_count() {
        // Files without the expected extensions are invisible to the
        // presence checks.
        let tree = MemTree::new()
            .file("run/s1/sub1/fastq_pass/summary.txt")
            .file("run/s1/sub1/fast5_pass/a.fast5");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(
            result.reason,
            "Did not find any fastq files in run/s1/sub1/fastq_pass"
        );
    }

    #[test]
    fn test_matched_basenames_pass() {
        let result = validate_run(&valid_tree(), Path::new("run"));
        assert!(result.success, "unexpected failure: {}", result.reason);
        assert!(result.reason.is_empty());
    }

    #[test]
    fn test_gz_suffix_pairs_with_plain_fast5() {
        // {a.fastq, b.fastq.gz} vs {a.fast5, b.fast5}: basenames {a, b}.
        let tree = valid_tree();
        assert!(validate_run(&tree, Path::new("run")).success);
    }

    #[test]
    fn test_extra_fast5_fails() {
        let tree = MemTree::new()
            .file("run/s1/sub1/fastq_pass/a.fastq")
            .file("run/s1/sub1/fast5_pass/a.fast5")
            .file("run/s1/sub1/fast5_pass/c.fast5");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(
            result.reason,
            "files in fastq_pass and fast5_pass in run/s1/sub1 did not match"
        );
    }

    #[test]
    fn test_missing_fast5_for_fastq_fails() {
        let tree = MemTree::new()
            .file("run/s1/sub1/fastq_pass/a.fastq")
            .file("run/s1/sub1/fastq_pass/b.fastq")
            .file("run/s1/sub1/fast5_pass/a.fast5");
        let result = validate_run(&tree, Path::new("run"));
        assert!(!result.success);
        assert_eq!(
            result.reason,
            "files in fastq_pass and fast5_pass in run/s1/sub1 did not match"
        );
    }

    #[test]
    fn test_multiple_samples_and_subruns_pass() {
        let tree = valid_tree()
            .file("run/s1/sub2/fastq_pass/c.fastq")
            .file("run/s1/sub2/fast5_pass/c.fast5")
            .file("run/s2/sub1/fastq_pass/d.fastq.gz")
            .file("run/s2/sub1/fast5_pass/d.fast5");
        assert!(validate_run(&tree, Path::new("run")).success);
    }

    #[test]
    fn test_idempotent() {
        let tree = valid_tree().file("run/s1/sub1/fast5_pass/c.fast5");
        let first = validate_run(&tree, Path::new("run"));
        let second = validate_run(&tree, Path::new("run"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_basename_splits_at_first_dot() {
        assert_eq!(basename("a.fastq.gz"), "a");
        assert_eq!(basename("read.1.fast5"), "read");
        assert_eq!(basename("plain"), "plain");
    }

    #[test]
    fn test_fastq_name_matching() {
        assert!(is_fastq_name("a.fastq"));
        assert!(is_fastq_name("a.fastq.gz"));
        assert!(!is_fastq_name("a.fast5"));
        assert!(!is_fastq_name("summary.txt"));
    }

    #[test]
    fn test_fast5_name_matching() {
        assert!(is_fast5_name("a.fast5"));
        assert!(!is_fast5_name("a.fast5.tmp"));
        assert!(!is_fast5_name("a.fastq"));
    }
}
