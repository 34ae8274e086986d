use std::fmt;

use serde::Serialize;

/// Group used for values elevated to global scope.
pub const EXPORT_GROUP: &str = "export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Local,
    Global,
}

/// Where a result is written: `${group.name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub group: String,
    pub name: String,
}

impl OutputTarget {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Key used in the global export group (`group.name`).
    pub fn export_key(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

/// One write performed against the host's output context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Write {
    pub scope: Scope,
    pub group: String,
    pub name: String,
    pub value: String,
}

/// Host-side output context. Write-only from the evaluator's point of view.
pub trait OutputSink {
    fn add_output(&mut self, scope: Scope, group: &str, name: &str, value: &str);
}

/// Sink that records every write in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<Write>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for RecordingSink {
    fn add_output(&mut self, scope: Scope, group: &str, name: &str, value: &str) {
        self.writes.push(Write {
            scope,
            group: group.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}
