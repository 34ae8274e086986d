use std::io::Write;

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::eval::Outcome;
use crate::plugins::StepFailure;

/// Install the stderr logger. `level` is a `log` level name; unknown names fall back to warn.
pub fn init(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    // A logger may already be installed (e.g. by an embedding host).
    let _ = TermLogger::init(filter, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Append an execution record to ~/.local/share/conditional-step/decisions.log.
/// Best-effort: failures are silently ignored.
pub fn log_decision(provider: &str, result: &Result<Outcome, StepFailure>) {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = std::path::Path::new(&home).join(".local/share/conditional-step");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_path = log_dir.join("decisions.log");
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };

    let _ = writeln!(file, "{}\t{provider}\t{}", timestamp_now(), record(result));
}

/// Status and detail columns for one execution.
fn record(result: &Result<Outcome, StepFailure>) -> String {
    match result {
        Ok(outcome) => {
            let value = outcome.selection.value().unwrap_or("-");
            let value: String = value.chars().take(200).collect();
            format!("ok\t{value}\t{}", outcome.reason.replace('\n', "; "))
        }
        Err(e) => {
            let detail = e.to_string().replace('\n', "; ");
            match &e.node {
                Some(node) => format!("failed\t-\t{detail} (node {node})"),
                None => format!("failed\t-\t{detail}"),
            }
        }
    }
}

/// UTC timestamp without a date-time dependency.
fn timestamp_now() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_timestamp(secs)
}

fn format_timestamp(secs: u64) -> String {
    let rem = secs % 86400;
    let (year, month, day) = epoch_days_to_date(secs / 86400);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + u64::from(m <= 2);
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Selection;
    use crate::plugins::FailureReason;

    #[test]
    fn epoch_start() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn leap_day() {
        // 2024-02-29T12:30:05Z
        assert_eq!(format_timestamp(1_709_209_805), "2024-02-29T12:30:05Z");
    }

    #[test]
    fn record_columns() {
        let ok = Ok(Outcome {
            selection: Selection::Value("v1".into()),
            elevate: false,
            reason: "matched k1".into(),
        });
        assert_eq!(record(&ok), "ok\tv1\tmatched k1");

        let none = Ok(Outcome {
            selection: Selection::NoOutput,
            elevate: false,
            reason: "no match, default is empty".into(),
        });
        assert_eq!(record(&none), "ok\t-\tno match, default is empty");

        let failed = Err(StepFailure {
            reason: FailureReason::InvalidJson,
            message: "invalid cases: eof".into(),
            node: None,
        });
        assert_eq!(record(&failed), "failed\t-\tinvalid JSON: invalid cases: eof");

        let on_node = Err(StepFailure {
            reason: FailureReason::MissingOption,
            message: "required option 'cases' is not set".into(),
            node: Some("web01".into()),
        });
        assert_eq!(
            record(&on_node),
            "failed\t-\tmissing option: required option 'cases' is not set (node web01)"
        );
    }
}
