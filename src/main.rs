//! conditional-step: run an if/else or switch/case step from the command line.
//!
//! Reads a JSON step request from stdin:
//!
//! ```json
//! {"plugin": "conditional.SwitchCaseStep", "node": "web01",
//!  "config": {"group": "raft", "name": "env", "testValue": "prod", "cases": "\"prod\":\"p\""}}
//! ```
//!
//! and prints the writes the step performed, or the failure that aborted it.
//! Exit status: 0 on success, 1 on step failure, 2 on unreadable input.

use conditional_step::config::Config;
use conditional_step::eval::RecordingSink;
use conditional_step::logging;
use conditional_step::plugins::{PluginRegistry, StepConfig};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::io::Read;

#[derive(Deserialize)]
struct StepRequest {
    plugin: String,
    #[serde(default)]
    node: Option<String>,
    #[serde(default)]
    config: Map<String, Value>,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

    let config = Config::load();
    logging::init(if verbose { "debug" } else { config.settings.log_level.as_str() });
    let registry = PluginRegistry::from_config(&config);

    if args.iter().any(|a| a == "--list") {
        for provider in registry.providers() {
            println!("{provider}");
        }
        return;
    }

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(2);
    }

    let request: StepRequest = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON parse error: {e}");
            std::process::exit(2);
        }
    };

    let mut step_config = StepConfig::new(request.config);
    if let Some(node) = request.node {
        step_config = step_config.on_node(node);
    }

    let mut sink = RecordingSink::new();
    let result = registry.execute(&request.plugin, &step_config, &mut sink);
    if config.settings.decision_log {
        logging::log_decision(&request.plugin, &result);
    }

    let (output, code) = match &result {
        Ok(outcome) => (
            json!({
                "status": "ok",
                "reason": outcome.reason,
                "writes": sink.writes,
            }),
            0,
        ),
        Err(failure) => (
            json!({
                "status": "failed",
                "reason": failure.reason.label(),
                "message": failure.message,
                "node": failure.node,
            }),
            1,
        ),
    };

    match serde_json::to_string(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("failed to encode output: {e}");
            std::process::exit(2);
        }
    }
    std::process::exit(code);
}
