// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `chainup`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chainup",
    version,
    about = "Launch a local blockchain dev environment and seed demo agents.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Chainup.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Chainup.toml", global = true)]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHAINUP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands: the two entry points of the tool.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the local node, deploy contracts, and boot the frontend.
    Up {
        /// Print the resolved stage plan without executing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Mint the built-in demo agents through the deployed contract.
    Seed,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
