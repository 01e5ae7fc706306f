//! e2e suite check - keeps CI and test-runner suite lists in sync
//!
//! Extracts e2e suite names from a CI job description (`env.jobs` and
//! `script`) and from the `suites` object of a test-runner config, then
//! verifies the three lists agree.

pub mod check;
pub mod cli;
pub mod commands;
pub mod common;
pub mod extract;

// Re-export commonly used types for tests
pub use check::{validate, SuiteLists, SuiteSource};
pub use common::{Config, Error, Result};
