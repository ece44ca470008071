use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use mvr::cli::{Cli, RunContext, RunError, run_cli};
use mvr::options::Options;
use mvr::output::OutputFormatter;
use mvr::paths;
use mvr::scanner::FileSystemCreationTime;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .init();

    let options = Options::from(cli);
    let destination = std::env::current_dir().context("could not read current directory")?;
    let home = paths::home_dir()?;

    let context = RunContext {
        destination,
        home,
        now: Local::now(),
        times: &FileSystemCreationTime,
    };

    match run_cli(&options, &context) {
        Ok(summary) if summary.report.is_complete_success() => Ok(ExitCode::SUCCESS),
        Ok(_) => Ok(ExitCode::FAILURE),
        Err(RunError::Options(e)) => {
            OutputFormatter::error(&e.to_string());
            Ok(ExitCode::from(2))
        }
    }
}
