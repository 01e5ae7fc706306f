//! CLI command handling
//!
//! Loads configuration, runs the extractors and formats output.

use std::path::Path;

use colored::Colorize;

use crate::check::{self, CheckReport, SuiteSource};
use crate::commands::{Commands, Options};
use crate::common::{paths, Config, Result};
use crate::extract;

/// Dispatch a CLI command
pub fn dispatch(command: Commands, options: &Options) -> Result<()> {
    let repo_root = options
        .repo_root
        .clone()
        .unwrap_or_else(paths::default_repo_root);

    let mut config = Config::load(&repo_root, options.config.as_deref())?;
    options.apply(&mut config);

    match command {
        Commands::Check => run_check(&repo_root, &config, options.json),
        Commands::List => run_list(&repo_root, &config, options.json),
    }
}

fn run_check(repo_root: &Path, config: &Config, json: bool) -> Result<()> {
    if !json {
        println!("Checking e2e tests are captured in CI config...");
    }

    let lists = extract::extract_all(repo_root, config)?;
    let suites = check::validate(lists, &config.excluded_suites, &config.sentinel)?;

    if json {
        let report = CheckReport {
            ci_file: paths::resolve(repo_root, &config.ci_file),
            runner_config: paths::resolve(repo_root, &config.runner_config),
            sentinel: config.sentinel.clone(),
            excluded_suites: config.excluded_suites.clone(),
            suites,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        tracing::info!(count = suites.len(), "e2e suites in sync");
        println!("{}", "Done!".green());
    }
    Ok(())
}

fn run_list(repo_root: &Path, config: &Config, json: bool) -> Result<()> {
    let lists = extract::extract_all(repo_root, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(());
    }

    for source in SuiteSource::ALL {
        let suites = lists.get(source);
        println!("{} ({}):", source.to_string().bold(), suites.len());
        for suite in suites {
            let excluded =
                source == SuiteSource::Runner && config.excluded_suites.contains(suite);
            if excluded {
                println!("  {} {}", suite, "(excluded)".dimmed());
            } else {
                println!("  {}", suite);
            }
        }
    }
    Ok(())
}
