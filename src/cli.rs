// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{CommandFactory, Parser, ValueEnum};

use crate::config::RawWatchConfig;

/// Command-line arguments for `pwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pwatch",
    version,
    about = "Execute a program periodically, showing output fullscreen.",
    long_about = None
)]
pub struct CliArgs {
    /// Interval in seconds between runs (fractions allowed).
    #[arg(short = 'n', long, value_name = "SECONDS", default_value_t = 5.0)]
    pub interval: f64,

    /// Run the command line through the user's command processor instead of
    /// executing the first argument directly.
    #[arg(short = 'x', long = "exec")]
    pub run_with_shell: bool,

    /// Hide the title line and timestamp banner.
    #[arg(short = 't', long = "no-title")]
    pub hide_title: bool,

    /// Exit when the command fails.
    #[arg(short = 'e', long = "errexit")]
    pub exit_on_error: bool,

    /// Measure the interval from the start of each run instead of its end.
    #[arg(short = 'p', long)]
    pub precise: bool,

    /// Exit when the output differs from the first run's output.
    #[arg(short = 'g', long = "chgexit")]
    pub exit_on_change: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// Scheduling and exit flags, before validation.
    pub fn raw_config(&self) -> RawWatchConfig {
        RawWatchConfig {
            interval_secs: self.interval,
            precise: self.precise,
            hide_title: self.hide_title,
            exit_on_error: self.exit_on_error,
            exit_on_change: self.exit_on_change,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::try_parse()`.
pub fn try_parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}

/// Print the usage text to stderr; stdout belongs to the frame.
pub fn print_usage() {
    eprintln!("{}", usage());
}

/// Rendered `--help` text.
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}
