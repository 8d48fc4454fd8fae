//! sheetsift command-line interface.

use clap::{ColorChoice, Parser};
use sheetsift_cli::logging::{LogConfig, LogFormat, init_logging};
use sheetsift_cli::render::stats_table;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod prompt;

use crate::cli::{Cli, Command};
use crate::commands::{RunOutcome, run_headers, run_interactive_cmd, run_run, run_values};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Headers(args) => exit_code(run_headers(&args)),
        Command::Values(args) => exit_code(run_values(&args)),
        Command::Run(args) => match run_run(&args) {
            Ok(RunOutcome::Unconfirmed) => 0,
            Ok(RunOutcome::Completed(report)) => {
                if args.json {
                    match serde_json::to_string_pretty(&report) {
                        Ok(json) => {
                            println!("{json}");
                            0
                        }
                        Err(error) => {
                            eprintln!("error: {error}");
                            1
                        }
                    }
                } else {
                    print_run_summary(&report);
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Interactive(args) => match run_interactive_cmd(&args) {
            Ok(outcome) => {
                if let Some(path) = &outcome.export.path {
                    println!("Saved {} ({} bytes)", path.display(), outcome.export.bytes);
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn exit_code(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn print_run_summary(report: &sheetsift_cli::report::RunReport) {
    println!(
        "{} of {} rows kept ({})",
        report.result_rows, report.source_rows, report.action
    );
    println!("{}", stats_table(&report.stats));
    match &report.output {
        Some(path) => println!("Saved {} ({} bytes)", path.display(), report.bytes),
        None => println!(
            "Dry run: {} would be written ({} bytes)",
            report.file_name, report.bytes
        ),
    }
}

/// Logging configuration from CLI flags. An explicit `--log-level` beats
/// `-v/-q`, and either one disables the `RUST_LOG` override.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        with_ansi,
        ..LogConfig::default()
    }
    .with_level_filter(level_filter)
    .with_format(LogFormat::from(cli.log_format))
    .with_log_file(cli.log_file.clone())
    .with_log_data(cli.log_data)
}
