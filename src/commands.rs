//! CLI command definitions
//!
//! Defines the clap commands for the e2e suite check.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::common::Config;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// Fail unless the CI file and the test-runner config declare the same suites (default)
    #[default]
    Check,

    /// Print the suites extracted from each source without comparing them
    #[command(alias = "ls")]
    List,
}

/// Options shared by every command
#[derive(Args, Debug, Default)]
pub struct Options {
    /// Repository root that relative paths are resolved against (default: current directory)
    #[arg(long, global = true)]
    pub repo_root: Option<PathBuf>,

    /// Config file, relative to the working directory (default: <repo-root>/.e2e-suites.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CI job description to read
    #[arg(long, global = true)]
    pub ci_file: Option<PathBuf>,

    /// Test-runner config to read
    #[arg(long, global = true)]
    pub runner_config: Option<PathBuf>,

    /// Suite that must be present in every source
    #[arg(long, global = true)]
    pub sentinel: Option<String>,

    /// Runner suite to leave out of the comparison; replaces the configured list.
    /// Can be specified multiple times: --exclude full --exclude fileUploadFeatures
    #[arg(long = "exclude", global = true)]
    pub excluded_suites: Vec<String>,

    /// Print a JSON report instead of status lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Options {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.ci_file {
            config.ci_file = path.clone();
        }
        if let Some(path) = &self.runner_config {
            config.runner_config = path.clone();
        }
        if let Some(sentinel) = &self.sentinel {
            config.sentinel = sentinel.clone();
        }
        if !self.excluded_suites.is_empty() {
            config.excluded_suites = self.excluded_suites.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let options = Options {
            ci_file: Some(PathBuf::from("ci.yml")),
            sentinel: Some("login".to_string()),
            excluded_suites: vec!["full".to_string()],
            ..Options::default()
        };
        let mut config = Config::default();
        options.apply(&mut config);

        assert_eq!(config.ci_file, PathBuf::from("ci.yml"));
        assert_eq!(config.runner_config, PathBuf::from("core/tests/protractor.conf.js"));
        assert_eq!(config.sentinel, "login");
        assert_eq!(config.excluded_suites, vec!["full".to_string()]);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = Config::default();
        Options::default().apply(&mut config);
        assert_eq!(config.excluded_suites.len(), 4);
    }
}
