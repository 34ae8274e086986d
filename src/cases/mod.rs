//! Switch/case matcher: a test value against a set of keyed cases.

pub mod literal;

pub use literal::{CaseMode, CaseSet, normalize};

use thiserror::Error;

use crate::eval::{Outcome, Selection};

#[derive(Debug, Error)]
pub enum CaseError {
    /// The structured case literal did not parse as a JSON object.
    #[error("invalid cases: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Look up `test_value` among the cases, falling back to `default_value`.
pub fn evaluate(
    test_value: &str,
    cases: &str,
    default_value: &str,
    mode: CaseMode,
) -> Result<Selection, CaseError> {
    let request = CaseRequest {
        test_value: test_value.to_string(),
        cases: cases.to_string(),
        default_value: default_value.to_string(),
        mode,
        elevate: false,
    };
    request.evaluate().map(|outcome| outcome.selection)
}

/// Fully assembled switch/case request.
#[derive(Debug, Clone, Default)]
pub struct CaseRequest {
    pub test_value: String,
    pub cases: String,
    pub default_value: String,
    pub mode: CaseMode,
    pub elevate: bool,
}

impl CaseRequest {
    pub fn evaluate(&self) -> Result<Outcome, CaseError> {
        let set = CaseSet::parse(&self.cases, self.mode).inspect_err(|e| {
            log::error!("Failed to parse cases.");
            log::error!("{e}");
        })?;
        let (selection, reason) = match set.lookup(&self.test_value) {
            Some(value) => (
                Selection::Value(value.to_string()),
                format!("matched {}", self.test_value),
            ),
            None => {
                let selection = Selection::fallback(&self.default_value);
                let reason = if selection.is_output() {
                    "no match, using default"
                } else {
                    "no match, default is empty"
                };
                (selection, reason.to_string())
            }
        };
        log::debug!("{reason}");
        Ok(Outcome {
            selection,
            elevate: self.elevate,
            reason,
        })
    }
}
