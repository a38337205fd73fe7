//! Batch validation over a directory of run roots.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, ValidateError};
use crate::run::validate_run;
use crate::tree::DirTree;
use crate::verdict::ValidationResult;

/// Verdict for one run root inside a batch.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Path of the validated run root.
    pub path: PathBuf,
    /// Verdict for that root.
    pub result: ValidationResult,
}

/// Validates every run root under `parent`, skipping names in `ignore`.
///
/// Each subdirectory is validated independently; one failing run does
/// not stop the batch. Outcomes preserve listing order.
pub fn validate_data_dir<T: DirTree>(
    tree: &T,
    parent: &Path,
    ignore: &BTreeSet<String>,
) -> Result<Vec<RunOutcome>> {
    if !tree.is_dir(parent) {
        return Err(ValidateError::NotADirectory {
            path: parent.to_path_buf(),
        });
    }
    let entries = tree
        .list(parent)
        .map_err(|source| ValidateError::DirectoryRead {
            path: parent.to_path_buf(),
            source,
        })?;

    let mut outcomes = Vec::new();
    for entry in entries {
        if !entry.is_dir || ignore.contains(&entry.name) {
            continue;
        }
        let result = validate_run(tree, &entry.path);
        if result.success {
            info!(run = %entry.path.display(), "run directory ok");
        } else {
            warn!(
                run = %entry.path.display(),
                reason = %result.reason,
                "run directory failed validation"
            );
        }
        outcomes.push(RunOutcome {
            path: entry.path,
            result,
        });
    }
    Ok(outcomes)
}

/// True when any outcome in the batch failed.
pub fn has_failures(outcomes: &[RunOutcome]) -> bool {
    outcomes.iter().any(|outcome| !outcome.result.success)
}
