use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::{self, Write};

use fraglog::cli::Cli;
use fraglog::config::FraglogConfig;
use fraglog::config_file::{self, ConfigFile};
use fraglog::logging::init_logging;
use fraglog::output::{write_report, write_summary};
use fraglog::pipeline::run_pipeline;
use fraglog::platform::ExitCode;
use fraglog::readers::open_input;

fn main() {
    let (cli, config_file) = process_args_with_config();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "fraglog", &mut io::stdout());
        ExitCode::Success.exit();
    }

    let config = FraglogConfig::from_cli(&cli);

    if cli.show_config {
        println!("{}", config.describe());
        println!("{}", config_file.describe());
        ExitCode::Success.exit();
    }

    init_logging(config.output.verbosity);

    if let Err(e) = run(&config) {
        eprintln!("fraglog: error: {:#}", e);
        ExitCode::for_error(&e).exit();
    }
    ExitCode::Success.exit();
}

fn run(config: &FraglogConfig) -> Result<()> {
    let reader = open_input(config.input.file.as_deref())?;
    let result = run_pipeline(reader, config).context("Failed to process log")?;

    write_report(&result.matches, &config.output.target).context("Failed to write report")?;
    tracing::info!(target_path = %config.output.target, "report written");

    let mut stderr = io::stderr().lock();
    if config.output.summary {
        write_summary(&mut stderr, &result.matches).context("Failed to print summary")?;
    }
    if config.output.stats {
        writeln!(stderr, "{}", result.stats.format_stats()).context("Failed to print stats")?;
    }
    Ok(())
}

/// Parse the command line with config file defaults spliced in front of the
/// user's arguments. Config and usage problems exit with status 2.
fn process_args_with_config() -> (Cli, ConfigFile) {
    let raw_args: Vec<String> = std::env::args().collect();

    let config_file = if config_file::ignore_config_requested(&raw_args) {
        ConfigFile::default()
    } else {
        let custom_path = config_file::custom_config_path(&raw_args);
        match ConfigFile::load_with_custom_path(custom_path.as_deref()) {
            Ok(config_file) => config_file,
            Err(e) => {
                eprintln!("fraglog: config error: {:#}", e);
                ExitCode::InvalidUsage.exit();
            }
        }
    };

    let processed_args = match config_file.process_args(raw_args) {
        Ok(processed) => processed,
        Err(e) => {
            eprintln!("fraglog: config error: {:#}", e);
            ExitCode::InvalidUsage.exit();
        }
    };

    // clap exits with status 2 on usage errors and 0 for --help/--version
    let cli = Cli::parse_from(processed_args);
    (cli, config_file)
}
