//! Pipeline configuration.
//!
//! Every key has a default, so an empty (or missing) `leadflow.toml` yields a
//! runnable configuration rooted in the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::defaults;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration handed to the orchestrator at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Filesystem locations used by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Destination of `valid_<name>` artifacts.
    #[serde(default = "default_processed")]
    pub processed: PathBuf,
    /// Destination of `invalid_<name>` artifacts and of files that failed.
    #[serde(default = "default_failed")]
    pub failed: PathBuf,
    /// Originals land in `<archive>/<YYYYMMDD>/`.
    #[serde(default = "default_archive")]
    pub archive: PathBuf,
    #[serde(default = "default_reports")]
    pub reports: PathBuf,
    #[serde(default = "default_logs")]
    pub logs: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_INPUT_DIR)
}

fn default_processed() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_PROCESSED_DIR)
}

fn default_failed() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_FAILED_DIR)
}

fn default_archive() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_ARCHIVE_DIR)
}

fn default_reports() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_REPORTS_DIR)
}

fn default_logs() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_LOGS_DIR)
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            processed: default_processed(),
            failed: default_failed(),
            archive: default_archive(),
            reports: default_reports(),
            logs: default_logs(),
        }
    }
}

impl PathsConfig {
    /// All paths rooted at `root`, using the default relative layout.
    pub fn rooted_at(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            input: root.join(defaults.input),
            processed: root.join(defaults.processed),
            failed: root.join(defaults.failed),
            archive: root.join(defaults.archive),
            reports: root.join(defaults.reports),
            logs: root.join(defaults.logs),
        }
    }

    fn all(&self) -> [&Path; 6] {
        [
            &self.input,
            &self.processed,
            &self.failed,
            &self.archive,
            &self.reports,
            &self.logs,
        ]
    }
}

/// Enumerated value sets checked by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_industries")]
    pub allowed_industries: Vec<String>,
    #[serde(default = "default_statuses")]
    pub valid_statuses: Vec<String>,
}

fn default_industries() -> Vec<String> {
    defaults::ALLOWED_INDUSTRIES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_statuses() -> Vec<String> {
    defaults::VALID_STATUSES.iter().map(|s| s.to_string()).collect()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allowed_industries: default_industries(),
            valid_statuses: default_statuses(),
        }
    }
}

/// Storage connection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    defaults::DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    defaults::DEFAULT_MAX_CONNECTIONS
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Run behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Upper bound for processing a single file; expiry fails the file.
    #[serde(default = "default_file_timeout")]
    pub file_timeout_secs: u64,
}

fn default_file_timeout() -> u64 {
    defaults::DEFAULT_FILE_TIMEOUT_SECS
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            file_timeout_secs: default_file_timeout(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// Priority:
    /// 1. explicit path (`--config`)
    /// 2. `LEADFLOW_CONFIG`
    /// 3. `leadflow.toml` in the working directory, if present
    /// 4. built-in defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::load(Path::new(&path));
            }
        }
        let local = Path::new(defaults::DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    /// Render as pretty TOML (for `leadflow config`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.validation.allowed_industries.is_empty() {
            return Err(ConfigError::Invalid(
                "validation.allowed_industries must not be empty".to_string(),
            ));
        }
        if self.validation.valid_statuses.is_empty() {
            return Err(ConfigError::Invalid(
                "validation.valid_statuses must not be empty".to_string(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.pipeline.file_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.file_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Create every configured directory.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in self.paths.all() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn file_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.pipeline.file_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.paths.input, PathBuf::from("data/input"));
        assert_eq!(config.validation.allowed_industries.len(), 7);
        assert_eq!(config.validation.valid_statuses.len(), 6);
        assert_eq!(config.pipeline.file_timeout_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = PipelineConfig::from_toml(
            r#"
            [paths]
            input = "/srv/leads/in"

            [validation]
            allowed_industries = ["Technology", "Energy"]

            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.input, PathBuf::from("/srv/leads/in"));
        assert_eq!(config.paths.archive, PathBuf::from("data/archive"));
        assert_eq!(config.validation.allowed_industries, vec!["Technology", "Energy"]);
        assert_eq!(config.validation.valid_statuses.len(), 6);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_empty_value_set_rejected() {
        let result = PipelineConfig::from_toml(
            r#"
            [validation]
            valid_statuses = []
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("leadflow.toml");
        std::fs::write(&path, "[paths\ninput = 1").unwrap();

        match PipelineConfig::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_round_trip_and_ensure_dirs() {
        let tmp = TempDir::new().unwrap();
        let config = PipelineConfig {
            paths: PathsConfig::rooted_at(tmp.path()),
            ..PipelineConfig::default()
        };

        let text = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);

        config.ensure_dirs().unwrap();
        assert!(tmp.path().join("data/input").is_dir());
        assert!(tmp.path().join("data/archive").is_dir());
        assert!(tmp.path().join("reports").is_dir());
    }
}
