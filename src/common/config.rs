//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{self, config_path};
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// CI job description, relative to the repository root
    #[serde(default = "default_ci_file")]
    pub ci_file: PathBuf,

    /// Test-runner configuration, relative to the repository root
    #[serde(default = "default_runner_config")]
    pub runner_config: PathBuf,

    /// A suite that must show up in every source
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Runner suites that are intentionally not run by the CI file
    #[serde(default = "default_excluded_suites")]
    pub excluded_suites: Vec<String>,

    /// Extraction patterns for the CI file
    #[serde(default)]
    pub patterns: Patterns,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ci_file: default_ci_file(),
            runner_config: default_runner_config(),
            sentinel: default_sentinel(),
            excluded_suites: default_excluded_suites(),
            patterns: Patterns::default(),
        }
    }
}

fn default_ci_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_CI_FILE)
}

fn default_runner_config() -> PathBuf {
    PathBuf::from(paths::DEFAULT_RUNNER_CONFIG)
}

fn default_sentinel() -> String {
    "explorationImprovementsTab".to_string()
}

// `full` is the catch-all suite; the rest run on a separate CI provider.
fn default_excluded_suites() -> Vec<String> {
    [
        "full",
        "classroomPageFileUploadFeatures",
        "fileUploadFeatures",
        "topicAndStoryEditorFileUploadFeatures",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Regular expressions used against the CI file
///
/// Each pattern must have exactly one capture group holding the suite name.
#[derive(Debug, Clone, Deserialize)]
pub struct Patterns {
    /// Matched against `env.jobs`, e.g. `RUN_E2E_TESTS_ACCESSIBILITY=true`
    #[serde(default = "default_jobs_pattern")]
    pub jobs: String,

    /// Matched against `script`, e.g. `bash scripts/run_e2e_tests.sh --suite="accessibility"`
    #[serde(default = "default_script_pattern")]
    pub script: String,
}

impl Default for Patterns {
    fn default() -> Self {
        Self {
            jobs: default_jobs_pattern(),
            script: default_script_pattern(),
        }
    }
}

fn default_jobs_pattern() -> String {
    r"RUN_E2E_TESTS_([A-Z_]*)=".to_string()
}

fn default_script_pattern() -> String {
    r#"bash scripts/run_e2e_tests.sh --suite="([a-zA-Z_-]*)""#.to_string()
}

impl Config {
    /// Load configuration for a repository
    ///
    /// An explicit path is taken as given, relative to the working
    /// directory, and must exist. Otherwise `.e2e-suites.toml` in the
    /// repository root is used if present, falling back to defaults.
    pub fn load(repo_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let path = config_path(repo_root);
        if path.exists() {
            return Self::from_file(&path);
        }

        tracing::debug!("No config file at {}, using defaults", path.display());
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = paths::read_file(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
