//! e2e suite check - keeps CI and test-runner suite lists in sync
//!
//! Fails the build when the CI job description and the test-runner
//! configuration disagree on which end-to-end suites exist.

use clap::Parser;
use e2e_suite_check::commands::{Commands, Options};
use e2e_suite_check::{cli, common::logging};

#[derive(Parser)]
#[command(
    name = "check-e2e-suites",
    about = "Check that e2e suites in the CI config match the test-runner config"
)]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: Options,
}

fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.options.verbose);

    let command = cli.command.unwrap_or_default();
    if let Err(e) = cli::dispatch(command, &cli.options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
