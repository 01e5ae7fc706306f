//! Suite name extraction
//!
//! Reads the CI file and the test-runner config of a repository and
//! produces the three suite lists the check compares.

mod ci_yaml;
mod runner_config;

use std::path::Path;

pub use ci_yaml::{
    snake_case_to_camel_case, suites_from_jobs, suites_from_script, CiFile, CiPatterns, TextBlock,
};
pub use runner_config::suites_from_runner_config;

use crate::check::SuiteLists;
use crate::common::{paths, Config, Result};

/// Read both config files of a repository and extract every suite list
pub fn extract_all(repo_root: &Path, config: &Config) -> Result<SuiteLists> {
    let patterns = CiPatterns::compile(&config.patterns)?;

    let runner_path = paths::resolve(repo_root, &config.runner_config);
    let runner = suites_from_runner_config(&paths::read_file(&runner_path)?)?;
    tracing::debug!(path = %runner_path.display(), count = runner.len(), "runner suites");

    let ci_path = paths::resolve(repo_root, &config.ci_file);
    let ci = CiFile::parse(&paths::read_file(&ci_path)?)?;
    let jobs = suites_from_jobs(&ci.env.jobs.as_text(), &patterns.jobs);
    let script = suites_from_script(&ci.script.as_text(), &patterns.script);
    tracing::debug!(
        path = %ci_path.display(),
        jobs = jobs.len(),
        script = script.len(),
        "CI suites"
    );

    Ok(SuiteLists {
        jobs,
        script,
        runner,
    })
}
