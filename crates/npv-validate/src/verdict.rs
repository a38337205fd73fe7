//! Validation verdict type.

use serde::{Deserialize, Serialize};

/// Outcome of validating one run directory.
///
/// A plain immutable value rather than an error type: layout violations
/// are expected outcomes, and callers compose verdicts without
/// unwinding. `reason` holds a single-sentence, path-qualified
/// description of the first failed check, or is empty on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when every structural check passed.
    pub success: bool,
    /// Reason for the first failed check; empty on success.
    pub reason: String,
}

impl ValidationResult {
    /// A passing verdict with an empty reason.
    pub fn pass() -> Self {
        Self {
            success: true,
            reason: String::new(),
        }
    }

    /// A failing verdict carrying a path-qualified reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: reason.into(),
        }
    }
}
