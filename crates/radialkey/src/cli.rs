//! Command-line interface definitions for radialkey.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `radialkey` binary.
#[derive(Parser, Debug)]
#[command(
    name = "radialkey",
    about = "Keyboard shortcuts for radial context menus",
    version
)]
pub struct Cli {
    /// Logging controls shared across radialkey binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Path to a radialkey configuration file (RON). Defaults apply when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration and print the command table.
    Check,
    /// Show which leaf a shortcut command selects.
    Resolve(ResolveArgs),
    /// Replay a scripted scenario against an in-memory menu host.
    Replay(ReplayArgs),
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Command name, e.g. `select_city`.
    #[arg(value_name = "COMMAND")]
    pub command: String,
}

/// Arguments for the `replay` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Scenario file (RON) describing the host layout and the steps to run.
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Run delays on the wall clock instead of a virtual clock.
    #[arg(long)]
    pub realtime: bool,
}
