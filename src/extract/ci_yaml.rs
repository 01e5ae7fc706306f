//! Suite extraction from the CI job description
//!
//! The CI file names each e2e suite twice: once as an environment toggle in
//! `env.jobs` (`RUN_E2E_TESTS_FOO_BAR=true`) and once as a script invocation
//! (`bash scripts/run_e2e_tests.sh --suite="fooBar"`).

use std::borrow::Cow;

use regex::Regex;
use serde::Deserialize;

use crate::common::config::Patterns;
use crate::common::{Error, Result};

/// The parts of a CI file the check cares about
#[derive(Deserialize, Debug)]
pub struct CiFile {
    /// Environment matrix
    pub env: CiEnv,
    /// Commands run by every job
    pub script: TextBlock,
}

/// The `env` mapping of a CI file
#[derive(Deserialize, Debug)]
pub struct CiEnv {
    /// One entry per job, or a single string holding all of them
    pub jobs: TextBlock,
}

/// A YAML value written either as one string or as a list of strings
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum TextBlock {
    Text(String),
    Lines(Vec<String>),
}

impl TextBlock {
    /// The block as a single string, list entries separated by newlines
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            TextBlock::Text(text) => Cow::Borrowed(text),
            TextBlock::Lines(lines) => Cow::Owned(lines.join("\n")),
        }
    }
}

impl CiFile {
    /// Parse the CI file, failing if `env.jobs` or `script` is absent
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Compiled extraction patterns for the CI file
#[derive(Debug, Clone)]
pub struct CiPatterns {
    pub jobs: Regex,
    pub script: Regex,
}

impl CiPatterns {
    /// Compile the configured patterns, rejecting ones without a capture group
    pub fn compile(patterns: &Patterns) -> Result<Self> {
        Ok(Self {
            jobs: compile_pattern("jobs", &patterns.jobs)?,
            script: compile_pattern("script", &patterns.script)?,
        })
    }
}

fn compile_pattern(name: &'static str, pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern).map_err(|e| Error::invalid_pattern(name, pattern, e))?;
    if regex.captures_len() < 2 {
        return Err(Error::invalid_pattern(
            name,
            pattern,
            "expected a capture group around the suite name",
        ));
    }
    Ok(regex)
}

/// Suite names toggled in the `env.jobs` section, converted to camelCase
pub fn suites_from_jobs(jobs: &str, pattern: &Regex) -> Vec<String> {
    let mut suites: Vec<String> = captures(jobs, pattern)
        .map(|name| snake_case_to_camel_case(&name.to_lowercase()))
        .collect();
    suites.sort();
    suites
}

/// Suite names passed to the e2e runner script in the `script` section
pub fn suites_from_script(script: &str, pattern: &Regex) -> Vec<String> {
    let mut suites: Vec<String> = captures(script, pattern).map(str::to_string).collect();
    suites.sort();
    suites
}

fn captures<'t>(text: &'t str, pattern: &'t Regex) -> impl Iterator<Item = &'t str> + 't {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Convert `foo_bar_baz` to `fooBarBaz`
///
/// The first component is kept as is; empty components disappear.
pub fn snake_case_to_camel_case(snake: &str) -> String {
    let mut parts = snake.split('_');
    let mut camel = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            camel.extend(first.to_uppercase());
            camel.push_str(&chars.as_str().to_lowercase());
        }
    }
    camel
}

#[cfg(test)]
mod tests {
    use super::*;

    const CI_FILE: &str = r#"
language: python
env:
  jobs:
    - RUN_E2E_TESTS_ACCESSIBILITY=true
    - RUN_E2E_TESTS_EXPLORATION_IMPROVEMENTS_TAB=true
    - RUN_E2E_TESTS_FOO_BAR=true
script:
  - if [ "$RUN_E2E_TESTS_ACCESSIBILITY" == 'true' ]; then bash scripts/run_e2e_tests.sh --suite="accessibility"; fi
  - if [ "$RUN_E2E_TESTS_FOO_BAR" == 'true' ]; then bash scripts/run_e2e_tests.sh --suite="fooBar"; fi
  - if [ "$RUN_E2E_TESTS_EXPLORATION_IMPROVEMENTS_TAB" == 'true' ]; then bash scripts/run_e2e_tests.sh --suite="explorationImprovementsTab"; fi
"#;

    fn default_patterns() -> CiPatterns {
        CiPatterns::compile(&Patterns::default()).unwrap()
    }

    #[test]
    fn test_snake_case_to_camel_case() {
        assert_eq!(snake_case_to_camel_case("foo_bar"), "fooBar");
        assert_eq!(snake_case_to_camel_case("accessibility"), "accessibility");
        assert_eq!(
            snake_case_to_camel_case("exploration_improvements_tab"),
            "explorationImprovementsTab"
        );
        assert_eq!(snake_case_to_camel_case("foo__bar_"), "fooBar");
        assert_eq!(snake_case_to_camel_case(""), "");
    }

    #[test]
    fn test_jobs_toggle_becomes_camel_case() {
        let patterns = default_patterns();
        let suites = suites_from_jobs("RUN_E2E_TESTS_FOO_BAR=true", &patterns.jobs);
        assert_eq!(suites, vec!["fooBar"]);
    }

    #[test]
    fn test_script_suite_argument() {
        let patterns = default_patterns();
        let suites = suites_from_script(
            r#"bash scripts/run_e2e_tests.sh --suite="accessibility""#,
            &patterns.script,
        );
        assert_eq!(suites, vec!["accessibility"]);
    }

    #[test]
    fn test_parse_ci_file_with_lists() {
        let ci = CiFile::parse(CI_FILE).unwrap();
        let patterns = default_patterns();

        let jobs = suites_from_jobs(&ci.env.jobs.as_text(), &patterns.jobs);
        assert_eq!(jobs, vec!["accessibility", "explorationImprovementsTab", "fooBar"]);

        let script = suites_from_script(&ci.script.as_text(), &patterns.script);
        assert_eq!(script, vec!["accessibility", "explorationImprovementsTab", "fooBar"]);
    }

    #[test]
    fn test_parse_ci_file_with_strings() {
        let ci = CiFile::parse(
            "env:\n  jobs: RUN_E2E_TESTS_B=true RUN_E2E_TESTS_A=true\nscript: >\n  bash scripts/run_e2e_tests.sh --suite=\"b\"\n",
        )
        .unwrap();
        let patterns = default_patterns();
        assert_eq!(suites_from_jobs(&ci.env.jobs.as_text(), &patterns.jobs), vec!["a", "b"]);
        assert_eq!(suites_from_script(&ci.script.as_text(), &patterns.script), vec!["b"]);
    }

    #[test]
    fn test_missing_keys_fail_to_parse() {
        assert!(matches!(CiFile::parse("script: echo\n"), Err(Error::Yaml(_))));
        assert!(matches!(CiFile::parse("env:\n  jobs: x\n"), Err(Error::Yaml(_))));
        assert!(matches!(CiFile::parse("env: [unclosed\n"), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_pattern_without_capture_group_is_rejected() {
        let patterns = Patterns {
            jobs: "RUN_E2E_TESTS_[A-Z_]*=".to_string(),
            ..Patterns::default()
        };
        let err = CiPatterns::compile(&patterns).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { name: "jobs", .. }));
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        let patterns = Patterns {
            script: "--suite=\"(".to_string(),
            ..Patterns::default()
        };
        let err = CiPatterns::compile(&patterns).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { name: "script", .. }));
    }
}
