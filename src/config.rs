use serde::{Deserialize, Serialize};

use crate::cases::CaseMode;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming an alternate user config file.
pub const CONFIG_ENV_VAR: &str = "CONDITIONAL_STEP_CONFIG";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub if_else: IfElseDefaults,
    #[serde(default)]
    pub switch_case: SwitchCaseDefaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub case_mode: CaseMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub decision_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            case_mode: CaseMode::default(),
            log_level: default_log_level(),
            decision_log: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".into()
}

/// Static option values for if/else steps, used when the step config omits them.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct IfElseDefaults {
    pub group: Option<String>,
    pub name: Option<String>,
    pub test_value: Option<String>,
    pub operator: Option<String>,
    pub comparison_value: Option<String>,
    pub if_true: Option<String>,
    pub if_false: Option<String>,
    #[serde(default)]
    pub elevate_to_global: bool,
}

/// Static option values for switch/case steps.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SwitchCaseDefaults {
    pub group: Option<String>,
    pub name: Option<String>,
    pub cases: Option<String>,
    pub test_value: Option<String>,
    pub default_value: Option<String>,
    #[serde(default)]
    pub elevate_to_global: bool,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    if_else: IfElseOverlay,
    #[serde(default)]
    switch_case: SwitchCaseOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    case_mode: Option<CaseMode>,
    log_level: Option<String>,
    decision_log: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct IfElseOverlay {
    group: Option<String>,
    name: Option<String>,
    test_value: Option<String>,
    operator: Option<String>,
    comparison_value: Option<String>,
    if_true: Option<String>,
    if_false: Option<String>,
    elevate_to_global: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct SwitchCaseOverlay {
    group: Option<String>,
    name: Option<String>,
    cases: Option<String>,
    test_value: Option<String>,
    default_value: Option<String>,
    elevate_to_global: Option<bool>,
}

// ── Merge logic ──

/// Scalars override only when the overlay sets them.
fn merge_opt<T>(base: &mut Option<T>, overlay: Option<T>) {
    if overlay.is_some() {
        *base = overlay;
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the user overlay (`$CONDITIONAL_STEP_CONFIG`, else
    ///    ~/.config/conditional-step/config.toml) if it exists
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Location of the user overlay file, if one can be determined.
    pub fn overlay_path() -> Option<std::path::PathBuf> {
        if let Some(custom) = std::env::var_os(CONFIG_ENV_VAR) {
            let raw = custom.to_string_lossy();
            return Some(shellexpand::tilde(&raw).into_owned().into());
        }
        let home = std::env::var_os("HOME")?;
        Some(std::path::Path::new(&home).join(".config/conditional-step/config.toml"))
    }

    fn load_overlay() -> Option<ConfigOverlay> {
        let path = Self::overlay_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("conditional-step: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings
        let s = overlay.settings;
        if let Some(v) = s.case_mode {
            self.settings.case_mode = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = s.decision_log {
            self.settings.decision_log = v;
        }

        // If/else
        let ie = overlay.if_else;
        merge_opt(&mut self.if_else.group, ie.group);
        merge_opt(&mut self.if_else.name, ie.name);
        merge_opt(&mut self.if_else.test_value, ie.test_value);
        merge_opt(&mut self.if_else.operator, ie.operator);
        merge_opt(&mut self.if_else.comparison_value, ie.comparison_value);
        merge_opt(&mut self.if_else.if_true, ie.if_true);
        merge_opt(&mut self.if_else.if_false, ie.if_false);
        if let Some(v) = ie.elevate_to_global {
            self.if_else.elevate_to_global = v;
        }

        // Switch/case
        let sc = overlay.switch_case;
        merge_opt(&mut self.switch_case.group, sc.group);
        merge_opt(&mut self.switch_case.name, sc.name);
        merge_opt(&mut self.switch_case.cases, sc.cases);
        merge_opt(&mut self.switch_case.test_value, sc.test_value);
        merge_opt(&mut self.switch_case.default_value, sc.default_value);
        if let Some(v) = sc.elevate_to_global {
            self.switch_case.elevate_to_global = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert_eq!(config.settings.case_mode, CaseMode::Structured);
        assert_eq!(config.settings.log_level, "warn");
        assert!(config.settings.decision_log);
    }

    #[test]
    fn default_plugin_values() {
        let config = Config::default_config();
        assert_eq!(config.if_else.if_false.as_deref(), Some(""));
        assert!(config.if_else.group.is_none());
        assert!(!config.if_else.elevate_to_global);
        assert_eq!(config.switch_case.default_value.as_deref(), Some(""));
        assert!(config.switch_case.cases.is_none());
    }

    #[test]
    fn overlay_switches_case_mode() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            case_mode = "delimited"
        "#,
        );
        assert_eq!(config.settings.case_mode, CaseMode::Delimited);
        // Untouched setting keeps its default
        assert_eq!(config.settings.log_level, "warn");
    }

    #[test]
    fn overlay_sets_plugin_defaults() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [if_else]
            group = "raft"
            elevate_to_global = true

            [switch_case]
            default_value = "other"
        "#,
        );
        assert_eq!(config.if_else.group.as_deref(), Some("raft"));
        assert!(config.if_else.elevate_to_global);
        assert_eq!(config.if_else.if_false.as_deref(), Some(""));
        assert_eq!(config.switch_case.default_value.as_deref(), Some("other"));
    }

    #[test]
    fn overlay_rejects_unknown_case_mode() {
        let result: Result<ConfigOverlay, _> = toml::from_str(
            r#"
            [settings]
            case_mode = "yaml"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.settings.case_mode, CaseMode::Structured);
        assert!(config.switch_case.group.is_none());
    }
}
