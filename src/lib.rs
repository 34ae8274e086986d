//! conditional-step: if/else and switch/case decision steps for workflow hosts.
//!
//! A step evaluates a test value and writes the chosen string to a named
//! variable slot (`${group.name}`), optionally exporting it to global scope as
//! `${export.group.name}`.
//!
//! # Architecture
//!
//! - **[`compare`]**: If/else comparator. String operators (`eq`, `lt`, `begins with`, ...)
//!   and numeric operators (`=`, `<`, `!=`, ...).
//! - **[`cases`]**: Switch/case matcher over a JSON-member or `k:v;k:v` case literal.
//! - **[`eval`]**: Shared outcome type and the local/global output policy.
//! - **[`plugins`]**: Host adapters that resolve step options and write results.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: stderr logger setup and the per-step decision log.

/// Switch/case matching and case-literal dialects.
pub mod cases;
/// If/else operators and comparison.
pub mod compare;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Evaluation outcome and output/elevation policy.
pub mod eval;
/// Logger setup and file-based decision logging.
pub mod logging;
/// Step plugins and their registry.
pub mod plugins;

use eval::{Outcome, RecordingSink};
use plugins::{PluginRegistry, StepConfig, StepFailure};

/// Build the registry from default config and run one step.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with a user config, build the registry directly.
pub fn execute(
    provider: &str,
    cfg: &StepConfig,
) -> (Result<Outcome, StepFailure>, RecordingSink) {
    let config = config::Config::default_config();
    let registry = PluginRegistry::from_config(&config);
    let mut sink = RecordingSink::new();
    let result = registry.execute(provider, cfg, &mut sink);
    (result, sink)
}
