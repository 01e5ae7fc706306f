//! Error types for the e2e suite check
//!
//! Messages name the file or suite source that failed so a red CI job
//! points straight at the config that needs fixing.

use thiserror::Error;

use crate::check::SuiteSource;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the e2e suite check
#[derive(Error, Debug)]
pub enum Error {
    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Parse Errors ===
    #[error("Failed to parse CI file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No `suites = {{...}}` object found in the test-runner config")]
    SuitesBlockNotFound,

    #[error("The `suites` object in the test-runner config contains a nested object; only a flat `name: [...]` list is supported")]
    NestedSuitesBlock,

    #[error("Invalid {name} pattern '{pattern}': {reason}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        reason: String,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Validation Errors ===
    #[error("The e2e test suites that have been extracted from {0} are empty.")]
    EmptySuites(SuiteSource),

    #[error("{sentinel} is expected to be in the e2e test suites extracted from {origin}, but it is missing.")]
    MissingSentinel {
        sentinel: String,
        origin: SuiteSource,
    },

    #[error("Suite '{0}' is excluded from the comparison but is not declared in the test-runner config. Remove it from the excluded suites.")]
    ExcludedSuiteMissing(String),

    #[error("Test-runner suites and CI suites are not in sync.\n{details}")]
    OutOfSync { details: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file read error for the given path
    pub fn file_read(path: &std::path::Path, error: std::io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(name: &'static str, pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            name,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
