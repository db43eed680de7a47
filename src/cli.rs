// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `shiftsync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shiftsync",
    version,
    about = "Sync shift records into calendars according to a JSON config.",
    long_about = None
)]
pub struct CliArgs {
    /// Shift data file to sync.
    #[arg(value_name = "SHIFTS_FILE")]
    pub shifts_file: PathBuf,

    /// Path to the config file (JSON).
    ///
    /// Default: `shiftsync.json` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "shiftsync.json")]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHIFTSYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate the config, print a summary and exit without syncing.
    #[arg(long)]
    pub check: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
