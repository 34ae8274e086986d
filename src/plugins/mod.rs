//! Host adapters: resolve step options, evaluate, and write the result.
//!
//! Each plugin is registered twice, once as a workflow step and once as a
//! node step. Both kinds share option handling and evaluation; node steps
//! additionally know which node they run on.

/// Option map access and option names.
pub mod context;
/// Step failure type and cause tags.
pub mod failure;
/// If/else step.
pub mod if_else;
/// Switch/case step.
pub mod switch_case;

pub use context::StepConfig;
pub use failure::{FailureReason, StepFailure};

use std::collections::BTreeMap;

use crate::config::Config;
use crate::eval::{Outcome, OutputSink, OutputTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Workflow,
    Node,
}

/// A step the host can execute against an option map and an output sink.
pub trait StepPlugin: Send + Sync {
    /// Provider name the host registers this plugin under.
    fn provider(&self) -> &'static str;

    fn kind(&self) -> StepKind;

    /// Run the step. `Err` aborts the enclosing workflow step.
    fn execute(&self, cfg: &StepConfig, sink: &mut dyn OutputSink) -> Result<Outcome, StepFailure>;
}

fn setting_message(target: &OutputTarget, cfg: &StepConfig, criteria: &str) -> String {
    match &cfg.node {
        Some(node) => format!("Setting {target} on {node} based on {criteria}"),
        None => format!("Setting {target} based on {criteria}"),
    }
}

/// Tag a failure with the node it happened on, for node steps.
fn failed_on(kind: StepKind, cfg: &StepConfig) -> impl FnOnce(StepFailure) -> StepFailure + '_ {
    move |failure| match kind {
        StepKind::Node => failure.on_node(cfg.node.as_deref()),
        StepKind::Workflow => failure,
    }
}

/// Registry of all step plugins, keyed by provider name.
pub struct PluginRegistry {
    plugins: BTreeMap<&'static str, Box<dyn StepPlugin>>,
}

impl PluginRegistry {
    /// Build the registry from configuration.
    pub fn from_config(config: &Config) -> Self {
        use if_else::IfElsePlugin;
        use switch_case::SwitchCasePlugin;

        let mode = config.settings.case_mode;
        let plugins: Vec<Box<dyn StepPlugin>> = vec![
            Box::new(IfElsePlugin::new(StepKind::Workflow, &config.if_else)),
            Box::new(IfElsePlugin::new(StepKind::Node, &config.if_else)),
            Box::new(SwitchCasePlugin::new(StepKind::Workflow, mode, &config.switch_case)),
            Box::new(SwitchCasePlugin::new(StepKind::Node, mode, &config.switch_case)),
        ];

        Self {
            plugins: plugins.into_iter().map(|p| (p.provider(), p)).collect(),
        }
    }

    pub fn get(&self, provider: &str) -> Option<&dyn StepPlugin> {
        self.plugins.get(provider).map(|b| b.as_ref())
    }

    /// Registered provider names, sorted.
    pub fn providers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.keys().copied()
    }

    /// Execute the named plugin.
    pub fn execute(
        &self,
        provider: &str,
        cfg: &StepConfig,
        sink: &mut dyn OutputSink,
    ) -> Result<Outcome, StepFailure> {
        let plugin = self
            .get(provider)
            .ok_or_else(|| StepFailure::unknown_plugin(provider))?;
        plugin.execute(cfg, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::RecordingSink;

    #[test]
    fn registers_four_providers() {
        let registry = PluginRegistry::from_config(&Config::default_config());
        let providers: Vec<_> = registry.providers().collect();
        assert_eq!(
            providers,
            vec![
                if_else::NODE_STEP_PROVIDER,
                if_else::STEP_PROVIDER,
                switch_case::NODE_STEP_PROVIDER,
                switch_case::STEP_PROVIDER,
            ]
        );
        assert_eq!(
            registry.get(if_else::NODE_STEP_PROVIDER).map(|p| p.kind()),
            Some(StepKind::Node)
        );
    }

    #[test]
    fn unknown_provider_fails() {
        let registry = PluginRegistry::from_config(&Config::default_config());
        let mut sink = RecordingSink::new();
        let err = registry
            .execute("conditional.Nope", &StepConfig::default(), &mut sink)
            .unwrap_err();
        assert_eq!(err.reason, FailureReason::UnknownPlugin);
    }

    #[test]
    fn node_message_names_node() {
        let target = OutputTarget::new("raft", "test");
        let cfg = StepConfig::default().on_node("web01");
        assert_eq!(
            setting_message(&target, &cfg, "a eq b"),
            "Setting raft.test on web01 based on a eq b"
        );
    }
}
