use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::cases::CaseError;

/// Stable cause tag reported to the host when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    InvalidJson,
    MissingOption,
    UnknownPlugin,
}

impl FailureReason {
    pub fn label(self) -> &'static str {
        match self {
            FailureReason::InvalidJson => "invalid JSON",
            FailureReason::MissingOption => "missing option",
            FailureReason::UnknownPlugin => "unknown plugin",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fatal step failure: the host aborts the step and reports `message`.
#[derive(Debug, Error)]
#[error("{reason}: {message}")]
pub struct StepFailure {
    pub reason: FailureReason,
    pub message: String,
    /// Node the failing step ran on (node steps only).
    pub node: Option<String>,
}

impl StepFailure {
    pub fn missing_option(key: &str) -> Self {
        Self {
            reason: FailureReason::MissingOption,
            message: format!("required option '{key}' is not set"),
            node: None,
        }
    }

    pub fn unknown_plugin(provider: &str) -> Self {
        Self {
            reason: FailureReason::UnknownPlugin,
            message: format!("no plugin registered as '{provider}'"),
            node: None,
        }
    }

    pub fn on_node(mut self, node: Option<&str>) -> Self {
        self.node = node.map(str::to_string);
        self
    }
}

impl From<CaseError> for StepFailure {
    fn from(err: CaseError) -> Self {
        Self {
            reason: FailureReason::InvalidJson,
            message: err.to_string(),
            node: None,
        }
    }
}
