// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `planline`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "planline",
    version,
    about = "Lay out project tasks and report their critical path.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Plan.toml")]
    pub plan: String,

    /// Project to show; repeat for several. Defaults to every project in
    /// file order.
    #[arg(long = "project", value_name = "ID")]
    pub projects: Vec<String>,

    /// Highlight the critical path and print each project's critical chain.
    #[arg(long)]
    pub critical: bool,

    /// Hide milestone rows.
    #[arg(long)]
    pub hide_milestones: bool,

    /// Only show tasks whose title or assignee contains this text.
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Projects to show folded.
    #[arg(long = "collapse", value_name = "ID")]
    pub collapse: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLANLINE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print a summary, render nothing.
    #[arg(long)]
    pub check: bool,
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
