/// The value chosen by an evaluator, or the explicit "write nothing" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Value(String),
    NoOutput,
}

impl Selection {
    /// A fallback value that is empty means "produce no output".
    pub fn fallback(value: &str) -> Self {
        if value.is_empty() {
            Selection::NoOutput
        } else {
            Selection::Value(value.to_string())
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::Value(v) => Some(v),
            Selection::NoOutput => None,
        }
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Selection::Value(_))
    }
}

/// Result of a single evaluation, ready for the output policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub selection: Selection,
    /// Copied from the request: also export the value to global scope.
    pub elevate: bool,
    pub reason: String,
}
