//! If/else comparator: one operator, two candidate values.

pub mod operator;

pub use operator::{NumericOp, Operator, TextOp};

use crate::eval::{Outcome, Selection};

/// Apply `operator` to the two operands. Unknown tokens never match.
pub fn matches(test_value: &str, operator: &str, comparison: &str) -> Option<Operator> {
    Operator::from_token(operator).filter(|op| op.test(test_value, comparison))
}

/// Choose `if_true` on a match, otherwise `if_false` (empty means no output).
pub fn evaluate(
    test_value: &str,
    operator: &str,
    comparison: &str,
    if_true: &str,
    if_false: &str,
) -> Selection {
    ComparisonRequest {
        test_value: test_value.to_string(),
        operator: operator.to_string(),
        comparison_value: comparison.to_string(),
        if_true: if_true.to_string(),
        if_false: if_false.to_string(),
        elevate: false,
    }
    .evaluate()
    .selection
}

/// Fully assembled if/else request.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRequest {
    pub test_value: String,
    pub operator: String,
    pub comparison_value: String,
    pub if_true: String,
    pub if_false: String,
    pub elevate: bool,
}

impl ComparisonRequest {
    pub fn evaluate(&self) -> Outcome {
        let (selection, reason) = match matches(&self.test_value, &self.operator, &self.comparison_value) {
            Some(op) => (
                Selection::Value(self.if_true.clone()),
                format!("matched {}", op.as_str()),
            ),
            None => {
                let selection = Selection::fallback(&self.if_false);
                let reason = if selection.is_output() {
                    "no match, using default"
                } else {
                    "no match, default is empty"
                };
                (selection, reason.to_string())
            }
        };
        log::debug!("{reason}");
        Outcome {
            selection,
            elevate: self.elevate,
            reason,
        }
    }
}
