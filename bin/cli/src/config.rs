//! Centralized CLI configuration.
//!
//! Configuration is loaded via the `config` crate from an optional TOML file
//! followed by environment variables, which take precedence. Environment
//! variables use the `FLOWSKETCH` prefix and `__` as the separator, e.g.
//! `FLOWSKETCH__STORAGE_PATH` or `FLOWSKETCH__EXPORT__MAX_DEPTH=64`.

use flowsketch_workflow::{
    ChildPolicy, CyclePolicy, DEFAULT_MAX_DEPTH, DEFAULT_WORKFLOW_KEY, ExportOptions,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// File holding the saved workflow list.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Key given to workflows created with `new`.
    #[serde(default = "default_workflow_key")]
    pub default_workflow_key: String,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Tree export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Tree export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Which connection targets become children.
    #[serde(default)]
    pub children: ChildPolicy,

    /// What to do when a cycle is reachable from a root.
    #[serde(default)]
    pub cycles: CyclePolicy,

    /// Deepest level an exported node may sit at.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Whether to pretty-print exported JSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("workflows.json")
}

fn default_workflow_key() -> String {
    DEFAULT_WORKFLOW_KEY.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            children: ChildPolicy::default(),
            cycles: CyclePolicy::default(),
            max_depth: default_max_depth(),
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    /// Returns the options passed to the tree exporter.
    #[must_use]
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            children: self.children,
            cycles: self.cycles,
            max_depth: self.max_depth,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            default_workflow_key: default_workflow_key(),
            log_filter: default_log_filter(),
            export: ExportConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder
            .add_source(
                config::Environment::with_prefix("FLOWSKETCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn config_has_correct_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.storage_path, PathBuf::from("workflows.json"));
        assert_eq!(config.default_workflow_key, "approval");
        assert_eq!(config.export.options(), ExportOptions::default());
        assert!(config.export.pretty);
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowsketch.toml");
        fs::write(
            &path,
            r#"
storage_path = "/tmp/saved.json"
default_workflow_key = "review"

[export]
children = "circle_targets_only"
cycles = "truncate"
max_depth = 32
pretty = false
"#,
        )
        .unwrap();

        let config = CliConfig::load(Some(&path)).expect("load");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/saved.json"));
        assert_eq!(config.default_workflow_key, "review");
        assert_eq!(config.export.children, ChildPolicy::CircleTargetsOnly);
        assert_eq!(config.export.cycles, CyclePolicy::Truncate);
        assert_eq!(config.export.options().max_depth, 32);
        assert!(!config.export.pretty);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CliConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
