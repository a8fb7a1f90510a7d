//! ci-once - Dependency Install Guard
//!
//! CLI entry point: parse flags, load config, run the guard.

use ci_once::cli::{commands, Cli};
use ci_once::error::{CiOnceError, CiOnceResult};
use ci_once::guard::{GuardConfig, Outcome};
use ci_once::logging;
use clap::Parser;
use console::style;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(outcome) => {
            if let Outcome::Failed(ref e) = outcome {
                report(e);
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &CiOnceError) {
    eprintln!("{} {}", style("ci-once: ERROR:").red().bold(), e);
    if let Some(hint) = e.hint() {
        eprintln!("{} {}", style("Hint:").yellow(), hint);
    }
}

async fn run() -> CiOnceResult<Outcome> {
    // Exits with 0 for --help/--version and 2 for usage errors
    let cli = Cli::parse();

    // Start from the flags so config discovery is logged too
    let log = logging::init(cli.verbose > 0);

    let cwd = commands::run::current_dir()?;
    let config = commands::run::load_config(&cli, &cwd).await?;
    log.apply(config.general.verbose, config.general.log_format);

    let guard_config = GuardConfig::resolve(&cwd, &config.guard, config.general.verbose);
    Ok(commands::run(guard_config).await)
}
