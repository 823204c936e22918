//! Evaluation options

use serde::{Deserialize, Serialize};

/// Options for path resolution and expression evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalOptions {
    /// Report malformed index elements as descriptive strings returned as
    /// successful results instead of errors
    #[serde(default)]
    pub legacy_errors: bool,
}

impl EvalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set legacy error strings
    pub fn with_legacy_errors(mut self, legacy: bool) -> Self {
        self.legacy_errors = legacy;
        self
    }
}
