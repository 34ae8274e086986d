//! If/else step: choose between two values based on one comparison.

use super::context::{self as opt, StepConfig};
use super::{StepFailure, StepKind, StepPlugin, failed_on, setting_message};
use crate::compare::ComparisonRequest;
use crate::config::IfElseDefaults;
use crate::eval::{self, Outcome, OutputSink, OutputTarget};

pub const STEP_PROVIDER: &str = "conditional.IfElseStep";
pub const NODE_STEP_PROVIDER: &str = "conditional.IfElseNodeStep";

pub struct IfElsePlugin {
    kind: StepKind,
    defaults: IfElseDefaults,
}

impl IfElsePlugin {
    pub fn new(kind: StepKind, defaults: &IfElseDefaults) -> Self {
        Self {
            kind,
            defaults: defaults.clone(),
        }
    }

    /// Resolve the output target and request from the step options.
    pub fn request(&self, cfg: &StepConfig) -> Result<(OutputTarget, ComparisonRequest), StepFailure> {
        let d = &self.defaults;
        let target = OutputTarget::new(
            cfg.require(opt::GROUP, d.group.as_ref())?,
            cfg.require(opt::NAME, d.name.as_ref())?,
        );
        let request = ComparisonRequest {
            test_value: cfg.require(opt::TEST_VALUE, d.test_value.as_ref())?,
            operator: cfg.require(opt::OPERATOR, d.operator.as_ref())?,
            comparison_value: cfg.require(opt::COMPARISON_VALUE, d.comparison_value.as_ref())?,
            if_true: cfg.require(opt::IF_TRUE, d.if_true.as_ref())?,
            if_false: cfg.optional(opt::IF_FALSE, d.if_false.as_ref()),
            elevate: cfg.flag(opt::ELEVATE_TO_GLOBAL, d.elevate_to_global),
        };
        Ok((target, request))
    }
}

impl StepPlugin for IfElsePlugin {
    fn provider(&self) -> &'static str {
        match self.kind {
            StepKind::Workflow => STEP_PROVIDER,
            StepKind::Node => NODE_STEP_PROVIDER,
        }
    }

    fn kind(&self) -> StepKind {
        self.kind
    }

    fn execute(&self, cfg: &StepConfig, sink: &mut dyn OutputSink) -> Result<Outcome, StepFailure> {
        self.run(cfg, sink).map_err(failed_on(self.kind, cfg))
    }
}

impl IfElsePlugin {
    fn run(&self, cfg: &StepConfig, sink: &mut dyn OutputSink) -> Result<Outcome, StepFailure> {
        let (target, request) = self.request(cfg)?;
        let criteria = format!(
            "{} {} {}",
            request.test_value, request.operator, request.comparison_value
        );
        log::debug!("{}", setting_message(&target, cfg, &criteria));

        let outcome = request.evaluate();
        eval::apply(&outcome, &target, sink);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{RecordingSink, Scope};
    use crate::plugins::FailureReason;
    use serde_json::{Value, json};

    fn cfg(value: Value) -> StepConfig {
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        StepConfig::new(map)
    }

    fn plugin() -> IfElsePlugin {
        IfElsePlugin::new(StepKind::Workflow, &IfElseDefaults::default())
    }

    #[test]
    fn writes_if_true_on_match() {
        let mut sink = RecordingSink::new();
        let c = cfg(json!({
            "group": "raft", "name": "test",
            "testValue": "apple", "operator": "eq", "comparisonValue": "apple",
            "ifTrue": "1", "ifFalse": "0"
        }));
        plugin().execute(&c, &mut sink).unwrap();
        assert_eq!(sink.writes.len(), 1);
        assert_eq!(sink.writes[0].value, "1");
    }

    #[test]
    fn missing_if_false_writes_nothing() {
        let mut sink = RecordingSink::new();
        let c = cfg(json!({
            "group": "raft", "name": "test",
            "testValue": "apple", "operator": "EQ", "comparisonValue": "apples",
            "ifTrue": "1"
        }));
        let outcome = plugin().execute(&c, &mut sink).unwrap();
        assert!(!outcome.selection.is_output());
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn elevation_writes_twice() {
        let mut sink = RecordingSink::new();
        let c = cfg(json!({
            "group": "raft", "name": "test",
            "testValue": "test", "operator": "EQ", "comparisonValue": "test",
            "ifTrue": "1", "ifFalse": "1", "elevateToGlobal": true
        }));
        plugin().execute(&c, &mut sink).unwrap();
        let scopes: Vec<_> = sink.writes.iter().map(|w| w.scope).collect();
        assert_eq!(scopes, vec![Scope::Local, Scope::Global]);
        assert_eq!(sink.writes[1].name, "raft.test");
    }

    #[test]
    fn static_defaults_fill_gaps() {
        let defaults = IfElseDefaults {
            group: Some("raft".into()),
            name: Some("test".into()),
            operator: Some(">".into()),
            comparison_value: Some("10".into()),
            if_true: Some("big".into()),
            if_false: Some("small".into()),
            ..Default::default()
        };
        let plugin = IfElsePlugin::new(StepKind::Node, &defaults);
        let mut sink = RecordingSink::new();
        plugin.execute(&cfg(json!({"testValue": "4"})), &mut sink).unwrap();
        assert_eq!(sink.writes[0].value, "small");
        assert_eq!(plugin.provider(), NODE_STEP_PROVIDER);
    }

    #[test]
    fn missing_operator_fails_step() {
        let mut sink = RecordingSink::new();
        let c = cfg(json!({"group": "g", "name": "n", "testValue": "a", "ifTrue": "1"}));
        let err = plugin().execute(&c, &mut sink).unwrap_err();
        assert_eq!(err.reason, FailureReason::MissingOption);
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn node_step_missing_option_names_node() {
        let plugin = IfElsePlugin::new(StepKind::Node, &IfElseDefaults::default());
        let mut sink = RecordingSink::new();
        let c = cfg(json!({"group": "g", "name": "n", "testValue": "a"})).on_node("web01");
        let err = plugin.execute(&c, &mut sink).unwrap_err();
        assert_eq!(err.reason, FailureReason::MissingOption);
        assert_eq!(err.node.as_deref(), Some("web01"));
    }
}
