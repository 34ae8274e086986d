pub mod outcome;
pub mod output;

pub use outcome::{Outcome, Selection};
pub use output::{EXPORT_GROUP, OutputSink, OutputTarget, RecordingSink, Scope, Write};

/// Turn an outcome into the ordered list of writes it implies.
///
/// `NoOutput` yields nothing. A value yields the local write, followed by the
/// global `export` write when the outcome is elevated.
pub fn plan_writes(outcome: &Outcome, target: &OutputTarget) -> Vec<Write> {
    let Some(value) = outcome.selection.value() else {
        return Vec::new();
    };

    let mut writes = vec![Write {
        scope: Scope::Local,
        group: target.group.clone(),
        name: target.name.clone(),
        value: value.to_string(),
    }];
    if outcome.elevate {
        writes.push(Write {
            scope: Scope::Global,
            group: EXPORT_GROUP.to_string(),
            name: target.export_key(),
            value: value.to_string(),
        });
    }
    writes
}

/// Perform the planned writes against a sink, returning how many were made.
pub fn apply(outcome: &Outcome, target: &OutputTarget, sink: &mut dyn OutputSink) -> usize {
    let writes = plan_writes(outcome, target);
    for write in &writes {
        sink.add_output(write.scope, &write.group, &write.name, &write.value);
        if write.scope == Scope::Global {
            log::debug!("Elevating to global ${{{}.{}}}.", write.group, write.name);
        }
    }
    writes.len()
}
