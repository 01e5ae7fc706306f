//! Repository-relative file locations
//!
//! Every path the check reads is resolved against a repository root so the
//! binary behaves the same whether CI runs it from the checkout or elsewhere.

use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Name of the optional per-repository configuration file
pub const CONFIG_FILE_NAME: &str = ".e2e-suites.toml";

/// Default location of the CI job description
pub const DEFAULT_CI_FILE: &str = ".travis.yml";

/// Default location of the test-runner configuration
pub const DEFAULT_RUNNER_CONFIG: &str = "core/tests/protractor.conf.js";

/// Get the path to the per-repository configuration file
pub fn config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CONFIG_FILE_NAME)
}

/// Resolve `path` against `repo_root` unless it is already absolute
pub fn resolve(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

/// Repository root to use when none is given on the command line
pub fn default_repo_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Read a whole file, attaching the path to any IO error
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))
}
