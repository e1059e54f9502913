//! Configuration management for `tasksheet`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`TASKSHEET_*`)
//! 3. Project config (`./tasksheet.yaml`, or the file given with `--config`)
//! 4. User config (`~/.config/tasksheet/config.yaml`)
//! 5. Defaults
//!
//! Every layer is a flat `key -> value` map; nested YAML is flattened with
//! dotted keys and keys are compared after normalising `_` to `-`.

use crate::error::{Result, TaskSheetError};
use crate::model::DEFAULT_ENVIRONMENT;
use crate::util::time::DEFAULT_DATE_FORMAT;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "tasksheet.yaml";

const ENV_PREFIX: &str = "TASKSHEET_";

pub const DEFAULT_TASKS_PATH: &str = "off_axis_deals_full_tasks_with_status.csv";
pub const DEFAULT_TEST_MATRIX_PATH: &str = "off_axis_done_feature_test_matrix.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "docs/off_axis_deals_master_tasks.csv";

/// Keys recognised in any layer.
pub const KNOWN_KEYS: &[&str] = &[
    "tasks",
    "test-matrix",
    "output",
    "roadmap",
    "environment",
    "date-format",
    "date",
];

/// `TASKSHEET_*` variables clap reads itself (`--log-file`); not config keys.
const CLI_ENV_KEYS: &[&str] = &["log-file"];

/// One configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents).map_err(|err| {
            TaskSheetError::Config(format!("{}: {err}", path.display()))
        })
    }

    /// Build a layer from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn from_yaml_str(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        let mut flat = HashMap::new();
        flatten_yaml(&value, "", &mut flat);

        let mut layer = Self::default();
        for (key, value) in flat {
            layer.insert(&key, value);
        }
        Ok(layer)
    }

    /// Build a layer from `TASKSHEET_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from an explicit set of environment variables.
    #[must_use]
    pub fn from_env_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                if CLI_ENV_KEYS.contains(&normalize_key(stripped).as_str()) {
                    continue;
                }
                layer.insert(stripped, value);
            }
        }
        layer
    }

    /// Insert a value under its normalised key.
    pub fn insert(&mut self, key: &str, value: String) {
        self.values.insert(normalize_key(key), value);
    }

    /// Look up a non-blank value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&normalize_key(key))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// CLI overrides for config loading.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tasks: Option<PathBuf>,
    pub test_matrix: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub roadmap: Option<PathBuf>,
    pub environment: Option<String>,
    pub date: Option<String>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(path) = &self.tasks {
            layer.insert("tasks", path.to_string_lossy().to_string());
        }
        if let Some(path) = &self.test_matrix {
            layer.insert("test-matrix", path.to_string_lossy().to_string());
        }
        if let Some(path) = &self.output {
            layer.insert("output", path.to_string_lossy().to_string());
        }
        if let Some(path) = &self.roadmap {
            layer.insert("roadmap", path.to_string_lossy().to_string());
        }
        if let Some(environment) = &self.environment {
            layer.insert("environment", environment.clone());
        }
        if let Some(date) = &self.date {
            layer.insert("date", date.clone());
        }

        layer
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.insert("tasks", DEFAULT_TASKS_PATH.to_string());
    layer.insert("test-matrix", DEFAULT_TEST_MATRIX_PATH.to_string());
    layer.insert("output", DEFAULT_OUTPUT_PATH.to_string());
    layer.insert("environment", DEFAULT_ENVIRONMENT.to_string());
    layer.insert("date-format", DEFAULT_DATE_FORMAT.to_string());
    layer
}

/// Load user config (`~/.config/tasksheet/config.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("tasksheet")
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Load project config: an explicit file, or `./tasksheet.yaml`.
///
/// # Errors
///
/// Returns an error if an explicit file is missing, or any file exists but
/// cannot be read or parsed.
pub fn load_project_config(explicit: Option<&Path>) -> Result<ConfigLayer> {
    match explicit {
        Some(path) if !path.exists() => Err(TaskSheetError::Config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => ConfigLayer::from_yaml(path),
        None => ConfigLayer::from_yaml(Path::new(PROJECT_CONFIG_FILE)),
    }
}

/// Load configuration with the full precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed.
pub fn load_config(config_file: Option<&Path>, cli: &CliOverrides) -> Result<ConfigLayer> {
    let layer = ConfigLayer::merge_layers(&[
        default_config_layer(),
        load_user_config()?,
        load_project_config(config_file)?,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]);

    for key in unknown_keys(&layer) {
        tracing::warn!(key = %key, "Ignoring unknown config key");
    }
    Ok(layer)
}

/// Keys in `layer` that no setting reads, sorted.
#[must_use]
pub fn unknown_keys(layer: &ConfigLayer) -> Vec<&str> {
    let mut keys: Vec<&str> = layer
        .values
        .keys()
        .map(String::as_str)
        .filter(|key| !KNOWN_KEYS.contains(key))
        .collect();
    keys.sort_unstable();
    keys
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub tasks: PathBuf,
    pub test_matrix: PathBuf,
    pub output: PathBuf,
    pub roadmap: Option<PathBuf>,
    pub environment: String,
    pub date_format: String,
    pub date: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_layer(&default_config_layer())
    }
}

impl Settings {
    /// Resolve settings from a merged layer; absent keys fall back to defaults.
    #[must_use]
    pub fn from_layer(layer: &ConfigLayer) -> Self {
        let path = |key: &str, default: &str| PathBuf::from(layer.get(key).unwrap_or(default));
        Self {
            tasks: path("tasks", DEFAULT_TASKS_PATH),
            test_matrix: path("test-matrix", DEFAULT_TEST_MATRIX_PATH),
            output: path("output", DEFAULT_OUTPUT_PATH),
            roadmap: layer.get("roadmap").map(PathBuf::from),
            environment: layer
                .get("environment")
                .unwrap_or(DEFAULT_ENVIRONMENT)
                .to_string(),
            date_format: layer
                .get("date-format")
                .unwrap_or(DEFAULT_DATE_FORMAT)
                .to_string(),
            date: layer.get("date").map(str::to_string),
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_resolve_to_fixed_paths() {
        let settings = Settings::default();
        assert_eq!(settings.tasks, PathBuf::from(DEFAULT_TASKS_PATH));
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(settings.environment, "Both");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(settings.roadmap.is_none());
        assert!(settings.date.is_none());
        assert_eq!(
            settings.test_matrix,
            PathBuf::from("off_axis_done_feature_test_matrix.csv")
        );
        assert_eq!(
            settings.output,
            PathBuf::from("docs/off_axis_deals_master_tasks.csv")
        );
    }

    #[test]
    fn yaml_keys_are_normalized() {
        let layer = ConfigLayer::from_yaml_str("test_matrix: scenarios.csv\ndate-format: \"%d/%m/%Y\"\n")
            .unwrap();
        let settings = Settings::from_layer(&layer);
        assert_eq!(settings.test_matrix, PathBuf::from("scenarios.csv"));
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn nested_yaml_is_flattened() {
        let layer = ConfigLayer::from_yaml_str("paths:\n  output: out.csv\n").unwrap();
        assert_eq!(layer.get("paths.output"), Some("out.csv"));
    }

    #[test]
    fn env_layer_reads_prefixed_vars() {
        let layer = ConfigLayer::from_env_vars([
            ("TASKSHEET_OUTPUT".to_string(), "env.csv".to_string()),
            ("TASKSHEET_DATE_FORMAT".to_string(), "%m/%d/%Y".to_string()),
            ("OTHER_OUTPUT".to_string(), "ignored.csv".to_string()),
        ]);
        assert_eq!(layer.get("output"), Some("env.csv"));
        assert_eq!(layer.get("date-format"), Some("%m/%d/%Y"));
        assert_eq!(layer.values.len(), 2);
    }

    #[test]
    fn env_layer_leaves_log_file_to_the_cli() {
        let layer = ConfigLayer::from_env_vars([
            ("TASKSHEET_LOG_FILE".to_string(), "run.log".to_string()),
            ("TASKSHEET_TASKS".to_string(), "tasks.csv".to_string()),
        ]);
        assert_eq!(layer.get("log-file"), None);
        assert!(unknown_keys(&layer).is_empty());
    }

    #[test]
    fn log_file_in_yaml_is_unknown() {
        let yaml = "log-file: run.log\noutput: out.csv\nthemes: dark\n";
        let layer = ConfigLayer::from_yaml_str(yaml).unwrap();
        assert_eq!(unknown_keys(&layer), vec!["log-file", "themes"]);
    }

    #[test]
    fn later_layers_win() {
        let mut project = ConfigLayer::default();
        project.insert("output", "project.csv".to_string());
        project.insert("environment", "UK".to_string());
        let cli = CliOverrides {
            output: Some(PathBuf::from("cli.csv")),
            ..CliOverrides::default()
        };

        let merged =
            ConfigLayer::merge_layers(&[default_config_layer(), project, cli.as_layer()]);
        let settings = Settings::from_layer(&merged);
        assert_eq!(settings.output, PathBuf::from("cli.csv"));
        assert_eq!(settings.environment, "UK");
        assert_eq!(settings.tasks, PathBuf::from(DEFAULT_TASKS_PATH));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let mut layer = ConfigLayer::default();
        layer.insert("environment", "   ".to_string());
        assert_eq!(Settings::from_layer(&layer).environment, "Both");
    }

    #[test]
    fn missing_yaml_file_is_empty_layer() {
        let temp = TempDir::new().expect("tempdir");
        let layer = ConfigLayer::from_yaml(&temp.path().join("nope.yaml")).unwrap();
        assert!(layer.values.is_empty());
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().expect("tempdir");
        let err = load_project_config(Some(&temp.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, TaskSheetError::Config(_)));
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "output: [unclosed").unwrap();
        let err = ConfigLayer::from_yaml(&path).unwrap_err();
        assert!(matches!(err, TaskSheetError::Config(_)));
    }
}
