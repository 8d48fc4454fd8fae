//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheetsift_cli::logging::LogFormat;
use sheetsift_model::RawFilter;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "sheetsift",
    version,
    about = "Filter and sort a spreadsheet, then export the result as xlsx",
    long_about = "Load the first worksheet of an Excel workbook with an explicit header row,\n\
                  filter it by up to two column values and/or sort it by a column,\n\
                  print summary statistics and write the result to a new .xlsx file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the column names read from a header row.
    Headers(HeadersArgs),

    /// List the distinct values of a column.
    Values(ValuesArgs),

    /// Filter and/or sort the sheet and export the result.
    Run(RunArgs),

    /// Walk through header confirmation, selection and export with prompts.
    Interactive(InteractiveArgs),
}

#[derive(Args)]
pub struct SheetArgs {
    /// Workbook to read (xlsx, xlsm, xls, xlsb or ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// 1-based sheet row holding the column names (default: detected).
    #[arg(long = "header-row", value_name = "N")]
    pub header_row: Option<usize>,
}

#[derive(Args)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Column whose values are listed.
    #[arg(long = "column", short = 'c', value_name = "COLUMN")]
    pub column: String,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Confirm the headers without showing them first.
    ///
    /// Without this flag the headers are printed and nothing else happens,
    /// so the header row can be checked before any filtering.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,

    /// Keep rows where COLUMN equals VALUE (repeat once to chain).
    #[arg(long = "filter", short = 'f', value_name = "COLUMN=VALUE")]
    pub filters: Vec<RawFilter>,

    /// Column to sort by, after filtering.
    #[arg(long = "sort", short = 's', value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort in descending order.
    #[arg(long = "descending", requires = "sort")]
    pub descending: bool,

    /// Name of the exported file (default: derived from the action, column and date).
    #[arg(long = "output", short = 'o', value_name = "NAME")]
    pub output: Option<String>,

    /// Directory the exported file is written to.
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Serialize through a temporary file instead of memory.
    #[arg(long = "staged-export")]
    pub staged_export: bool,

    /// Build the workbook but do not write it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print a JSON report instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct InteractiveArgs {
    /// Workbook to read (xlsx, xlsm, xls, xlsb or ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory the exported file is written to.
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
