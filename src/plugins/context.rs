use serde_json::{Map, Value};

use super::failure::StepFailure;

pub const GROUP: &str = "group";
pub const NAME: &str = "name";
pub const TEST_VALUE: &str = "testValue";
pub const OPERATOR: &str = "operator";
pub const COMPARISON_VALUE: &str = "comparisonValue";
pub const IF_TRUE: &str = "ifTrue";
pub const IF_FALSE: &str = "ifFalse";
pub const CASES: &str = "cases";
pub const DEFAULT_VALUE: &str = "defaultValue";
pub const ELEVATE_TO_GLOBAL: &str = "elevateToGlobal";

/// Option map handed to a step by the host, plus the node it runs on (node steps only).
#[derive(Debug, Clone, Default)]
pub struct StepConfig {
    pub options: Map<String, Value>,
    pub node: Option<String>,
}

impl StepConfig {
    pub fn new(options: Map<String, Value>) -> Self {
        Self {
            options,
            node: None,
        }
    }

    pub fn on_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Text form of an option. `null` counts as missing.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.options.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Option value, else the static default, else an error naming the option.
    pub fn require(&self, key: &str, default: Option<&String>) -> Result<String, StepFailure> {
        self.get(key)
            .or_else(|| default.cloned())
            .ok_or_else(|| StepFailure::missing_option(key))
    }

    /// Option value, else the static default, else empty.
    pub fn optional(&self, key: &str, default: Option<&String>) -> String {
        self.get(key).or_else(|| default.cloned()).unwrap_or_default()
    }

    /// Boolean flag: JSON `true` or the literal string `"true"`.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.options.get(key) {
            None | Some(Value::Null) => default,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            Some(_) => false,
        }
    }
}
