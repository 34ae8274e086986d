//! Switch/case step: choose one of several values keyed by the test value.

use super::context::{self as opt, StepConfig};
use super::{StepFailure, StepKind, StepPlugin, failed_on, setting_message};
use crate::cases::{CaseMode, CaseRequest};
use crate::config::SwitchCaseDefaults;
use crate::eval::{self, Outcome, OutputSink, OutputTarget};

pub const STEP_PROVIDER: &str = "conditional.SwitchCaseStep";
pub const NODE_STEP_PROVIDER: &str = "conditional.SwitchCaseNodeStep";

pub struct SwitchCasePlugin {
    kind: StepKind,
    mode: CaseMode,
    defaults: SwitchCaseDefaults,
}

impl SwitchCasePlugin {
    pub fn new(kind: StepKind, mode: CaseMode, defaults: &SwitchCaseDefaults) -> Self {
        Self {
            kind,
            mode,
            defaults: defaults.clone(),
        }
    }

    pub fn request(&self, cfg: &StepConfig) -> Result<(OutputTarget, CaseRequest), StepFailure> {
        let d = &self.defaults;
        let target = OutputTarget::new(
            cfg.require(opt::GROUP, d.group.as_ref())?,
            cfg.require(opt::NAME, d.name.as_ref())?,
        );
        let request = CaseRequest {
            test_value: cfg.require(opt::TEST_VALUE, d.test_value.as_ref())?,
            cases: cfg.require(opt::CASES, d.cases.as_ref())?,
            default_value: cfg.optional(opt::DEFAULT_VALUE, d.default_value.as_ref()),
            mode: self.mode,
            elevate: cfg.flag(opt::ELEVATE_TO_GLOBAL, d.elevate_to_global),
        };
        Ok((target, request))
    }
}

impl StepPlugin for SwitchCasePlugin {
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

impl SwitchCasePlugin {
    fn run(&self, cfg: &StepConfig, sink: &mut dyn OutputSink) -> Result<Outcome, StepFailure> {
        let (target, request) = self.request(cfg)?;
        let criteria = format!("{} {}", request.test_value, request.cases);
        log::debug!("{}", setting_message(&target, cfg, &criteria));

        let outcome = request.evaluate()?;
        eval::apply(&outcome, &target, sink);
        Ok(outcome)
    }
}
