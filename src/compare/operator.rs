//! Operator vocabulary: string-family words and numeric-family symbols.
//!
//! Numeric operands follow the host's decimal literal spelling: surrounding
//! whitespace is ignored, an optional sign, digits with an optional fraction
//! and exponent (`1.5`, `.5`, `1e3`), and an optional `d`/`D`/`f`/`F` type
//! suffix (`1d`, `2.5f`). The words `NaN` and `Infinity` are accepted with
//! exactly that capitalization. Lowercase `inf`/`nan` and hex literals are not
//! numbers and never match.

use std::cmp::Ordering;

/// String-family operators. Ordering uses code-point (ordinal) comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Eq,
    Ne,
    Lt,
    Le,
    Ge,
    Gt,
    BeginsWith,
    EndsWith,
}

impl TextOp {
    pub const ALL: [TextOp; 8] = [
        TextOp::Eq,
        TextOp::Ne,
        TextOp::Lt,
        TextOp::Le,
        TextOp::Ge,
        TextOp::Gt,
        TextOp::BeginsWith,
        TextOp::EndsWith,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == token)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextOp::Eq => "eq",
            TextOp::Ne => "ne",
            TextOp::Lt => "lt",
            TextOp::Le => "le",
            TextOp::Ge => "ge",
            TextOp::Gt => "gt",
            TextOp::BeginsWith => "begins with",
            TextOp::EndsWith => "ends with",
        }
    }

    pub fn test(self, test_value: &str, comparison: &str) -> bool {
        match self {
            TextOp::Eq => test_value == comparison,
            TextOp::Ne => test_value != comparison,
            TextOp::BeginsWith => test_value.starts_with(comparison),
            TextOp::EndsWith => test_value.ends_with(comparison),
            TextOp::Lt => test_value.cmp(comparison) == Ordering::Less,
            TextOp::Le => test_value.cmp(comparison) != Ordering::Greater,
            TextOp::Ge => test_value.cmp(comparison) != Ordering::Less,
            TextOp::Gt => test_value.cmp(comparison) == Ordering::Greater,
        }
    }
}

/// Numeric-family operators. Operands are parsed as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Ne,
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
}

impl NumericOp {
    pub const ALL: [NumericOp; 6] = [
        NumericOp::Eq,
        NumericOp::Ne,
        NumericOp::Lt,
        NumericOp::Le,
        NumericOp::Ge,
        NumericOp::Gt,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == token)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NumericOp::Ne => "!=",
            NumericOp::Lt => "<",
            NumericOp::Le => "<=",
            NumericOp::Eq => "=",
            NumericOp::Ge => ">=",
            NumericOp::Gt => ">",
        }
    }

    /// Compare the two operands numerically. Either operand failing to parse
    /// is a non-match, never an error.
    pub fn test(self, test_value: &str, comparison: &str) -> bool {
        let (Some(a), Some(b)) = (parse_number(test_value), parse_number(comparison)) else {
            return false;
        };
        match self {
            NumericOp::Ne => a != b,
            NumericOp::Lt => a < b,
            NumericOp::Le => a <= b,
            NumericOp::Eq => a == b,
            NumericOp::Ge => a >= b,
            NumericOp::Gt => a > b,
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if unsigned == "NaN" || unsigned == "Infinity" {
        return raw.parse().ok();
    }

    let literal = raw.strip_suffix(['d', 'D', 'f', 'F']).unwrap_or(raw);
    let body = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    let decimal = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return None;
    }
    literal.parse().ok()
}

/// A recognized operator token, tagged with its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Text(TextOp),
    Numeric(NumericOp),
}

impl Operator {
    /// Resolve a token against the string family first, then the numeric family.
    pub fn from_token(token: &str) -> Option<Self> {
        TextOp::from_token(token)
            .map(Operator::Text)
            .or_else(|| NumericOp::from_token(token).map(Operator::Numeric))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Text(op) => op.as_str(),
            Operator::Numeric(op) => op.as_str(),
        }
    }

    pub fn test(self, test_value: &str, comparison: &str) -> bool {
        match self {
            Operator::Text(op) => op.test(test_value, comparison),
            Operator::Numeric(op) => op.test(test_value, comparison),
        }
    }
}
