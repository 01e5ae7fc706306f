//! Suite list validation
//!
//! The CI file and the test-runner config must agree on the set of e2e
//! suites. A few runner suites are known not to run on this CI and are
//! excluded before comparing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::common::{Error, Result};

/// Where a suite list was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteSource {
    /// `env.jobs` of the CI file
    Jobs,
    /// `script` of the CI file
    Script,
    /// `suites` object of the test-runner config
    Runner,
}

impl SuiteSource {
    /// Every source, in the order checks are reported
    pub const ALL: [SuiteSource; 3] = [SuiteSource::Jobs, SuiteSource::Script, SuiteSource::Runner];
}

impl fmt::Display for SuiteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteSource::Jobs => write!(f, "the jobs section of the CI file"),
            SuiteSource::Script => write!(f, "the script section of the CI file"),
            SuiteSource::Runner => write!(f, "the test-runner config"),
        }
    }
}

/// The three sorted suite lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteLists {
    pub jobs: Vec<String>,
    pub script: Vec<String>,
    pub runner: Vec<String>,
}

impl SuiteLists {
    /// The list extracted from `source`
    pub fn get(&self, source: SuiteSource) -> &[String] {
        match source {
            SuiteSource::Jobs => &self.jobs,
            SuiteSource::Script => &self.script,
            SuiteSource::Runner => &self.runner,
        }
    }
}

/// Summary of a passing check
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub ci_file: PathBuf,
    pub runner_config: PathBuf,
    pub sentinel: String,
    pub excluded_suites: Vec<String>,
    /// The suites every source agrees on
    pub suites: Vec<String>,
}

/// Validate the extracted lists
///
/// Checks, in order: excluded suites are declared by the runner config,
/// no list is empty, the sentinel suite is in every list, and all lists
/// are equal. Returns the agreed suite list.
pub fn validate(mut lists: SuiteLists, excluded: &[String], sentinel: &str) -> Result<Vec<String>> {
    remove_excluded(&mut lists.runner, excluded)?;

    for source in SuiteSource::ALL {
        if lists.get(source).is_empty() {
            return Err(Error::EmptySuites(source));
        }
    }

    for source in SuiteSource::ALL {
        if !lists.get(source).iter().any(|suite| suite == sentinel) {
            return Err(Error::MissingSentinel {
                sentinel: sentinel.to_string(),
                origin: source,
            });
        }
    }

    let mut jobs = lists.jobs.clone();
    let mut script = lists.script.clone();
    let mut runner = lists.runner.clone();
    jobs.sort();
    script.sort();
    runner.sort();

    if runner != jobs || jobs != script {
        return Err(Error::OutOfSync {
            details: describe_drift(&lists),
        });
    }

    tracing::debug!(count = jobs.len(), "suite lists agree");
    Ok(jobs)
}

/// Drop each excluded suite from the runner list
///
/// An excluded suite the runner config no longer declares is an error, so
/// stale exclusions get cleaned up.
pub fn remove_excluded(runner: &mut Vec<String>, excluded: &[String]) -> Result<()> {
    for name in excluded {
        let Some(index) = runner.iter().position(|suite| suite == name) else {
            return Err(Error::ExcludedSuiteMissing(name.clone()));
        };
        runner.remove(index);
        tracing::debug!(suite = %name, "excluded from comparison");
    }
    Ok(())
}

/// Per source, the suites it lacks compared to the others and any duplicates
fn describe_drift(lists: &SuiteLists) -> String {
    let all: BTreeSet<&str> = SuiteSource::ALL
        .iter()
        .flat_map(|source| lists.get(*source))
        .map(String::as_str)
        .collect();

    let mut lines = Vec::new();
    for source in SuiteSource::ALL {
        let suites = lists.get(source);
        let present: BTreeSet<&str> = suites.iter().map(String::as_str).collect();
        let missing: Vec<&str> = all.difference(&present).copied().collect();
        if !missing.is_empty() {
            lines.push(format!("  {} is missing: {}", source, missing.join(", ")));
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for suite in suites {
            *counts.entry(suite.as_str()).or_default() += 1;
        }
        let duplicated: Vec<&str> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(suite, _)| suite)
            .collect();
        if !duplicated.is_empty() {
            lines.push(format!("  {} lists more than once: {}", source, duplicated.join(", ")));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "explorationImprovementsTab";

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn in_sync() -> SuiteLists {
        let suites = names(&["accessibility", "explorationImprovementsTab", "fooBar"]);
        SuiteLists {
            jobs: suites.clone(),
            script: suites.clone(),
            runner: suites,
        }
    }

    #[test]
    fn test_equal_lists_pass() {
        let agreed = validate(in_sync(), &[], SENTINEL).unwrap();
        assert_eq!(agreed, names(&["accessibility", "explorationImprovementsTab", "fooBar"]));
    }

    #[test]
    fn test_excluded_suite_is_ignored() {
        let mut lists = in_sync();
        lists.runner = names(&["accessibility", "explorationImprovementsTab", "fooBar", "full"]);
        assert!(validate(lists, &names(&["full"]), SENTINEL).is_ok());
    }

    #[test]
    fn test_stale_exclusion_fails() {
        let err = validate(in_sync(), &names(&["full"]), SENTINEL).unwrap_err();
        assert!(matches!(err, Error::ExcludedSuiteMissing(ref name) if name == "full"));
    }

    #[test]
    fn test_empty_list_names_source() {
        for source in SuiteSource::ALL {
            let mut lists = in_sync();
            match source {
                SuiteSource::Jobs => lists.jobs.clear(),
                SuiteSource::Script => lists.script.clear(),
                SuiteSource::Runner => lists.runner.clear(),
            }
            let err = validate(lists, &[], SENTINEL).unwrap_err();
            assert!(matches!(err, Error::EmptySuites(s) if s == source));
            assert!(err.to_string().contains(&source.to_string()));
        }
    }

    #[test]
    fn test_empty_runner_after_exclusion() {
        let mut lists = in_sync();
        lists.runner = names(&["full"]);
        let err = validate(lists, &names(&["full"]), SENTINEL).unwrap_err();
        assert!(matches!(err, Error::EmptySuites(SuiteSource::Runner)));
    }

    #[test]
    fn test_missing_sentinel_names_source() {
        let mut lists = in_sync();
        lists.script = names(&["accessibility", "fooBar"]);
        let err = validate(lists, &[], SENTINEL).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSentinel { origin: SuiteSource::Script, .. }
        ));
        assert!(err.to_string().starts_with("explorationImprovementsTab is expected"));
    }

    #[test]
    fn test_one_extra_suite_is_out_of_sync() {
        let mut lists = in_sync();
        lists.jobs.push("zeta".to_string());
        let err = validate(lists, &[], SENTINEL).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not in sync"));
        assert!(message.contains("the script section of the CI file is missing: zeta"));
        assert!(message.contains("the test-runner config is missing: zeta"));
        assert!(!message.contains("jobs section of the CI file is missing"));
    }

    #[test]
    fn test_duplicate_suite_is_out_of_sync() {
        let mut lists = in_sync();
        lists.runner.push("fooBar".to_string());
        let err = validate(lists, &[], SENTINEL).unwrap_err();
        assert!(err
            .to_string()
            .contains("the test-runner config lists more than once: fooBar"));
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut lists = in_sync();
        lists.script.reverse();
        assert!(validate(lists, &[], SENTINEL).is_ok());
    }
}
