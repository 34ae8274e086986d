//! Case-literal dialects and the parsed case set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CaseError;

/// Which case-literal syntax a switch step accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Members of a JSON object: `"k1":"v1","k2":"v2"`. Malformed input is an error.
    #[default]
    Structured,
    /// `k1:v1;k2:v2`. Malformed entries never match.
    Delimited,
}

/// Coerce a loosely written object literal into a strict one.
///
/// Trims whitespace and drops a trailing comma (including one just before the
/// closing brace). A literal is only treated as already braced when it opens
/// with `{`; a bare member list is wrapped whole, so a trailing object value
/// keeps its own closing brace.
pub fn normalize(literal: &str) -> String {
    let trimmed = literal.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    let body = match trimmed.strip_prefix('{') {
        Some(inner) if trimmed.ends_with('}') => inner.strip_suffix('}').unwrap_or(inner),
        Some(inner) => inner,
        None => trimmed,
    };
    let body = body.trim();
    let body = body.strip_suffix(',').unwrap_or(body).trim_end();
    format!("{{{body}}}")
}

/// A parsed set of cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseSet {
    /// Keyed lookup; keys are unique.
    Structured(BTreeMap<String, String>),
    /// Ordered scan; first matching key wins.
    Delimited(Vec<(String, String)>),
}

impl CaseSet {
    pub fn parse(literal: &str, mode: CaseMode) -> Result<Self, CaseError> {
        match mode {
            CaseMode::Structured => Self::parse_structured(literal),
            CaseMode::Delimited => Ok(Self::parse_delimited(literal)),
        }
    }

    fn parse_structured(literal: &str) -> Result<Self, CaseError> {
        let object: Map<String, Value> = serde_json::from_str(&normalize(literal))?;
        let cases = object
            .into_iter()
            .map(|(key, value)| (key, value_text(value)))
            .collect();
        Ok(CaseSet::Structured(cases))
    }

    fn parse_delimited(literal: &str) -> Self {
        let cases = literal
            .split(';')
            .filter_map(|entry| entry.split_once(':'))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CaseSet::Delimited(cases)
    }

    pub fn lookup(&self, test_value: &str) -> Option<&str> {
        match self {
            CaseSet::Structured(cases) => cases.get(test_value).map(String::as_str),
            CaseSet::Delimited(cases) => cases
                .iter()
                .find(|(key, _)| key == test_value)
                .map(|(_, value)| value.as_str()),
        }
    }
}

/// Text form of a case value.
///
/// Strings are taken verbatim. Numbers, booleans and `null` become their JSON
/// text (`1.5`, `true`, `null`). Arrays and objects become compact JSON
/// (`{"x":"1"}`) rather than an empty string, so a nested value can still be
/// forwarded to a later step.
fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
