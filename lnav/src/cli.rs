//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Mode;

/// LifeNav - personalized daily plan generator
#[derive(Parser)]
#[command(
    name = "lnav",
    about = "Generate a personalized routine, meal, task and calendar plan",
    version,
    after_help = "Logs are written to: ~/.local/share/lifenav/logs/lifenav.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, help = "Log level (overrides config)")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a plan and write it to disk
    Plan(PlanArgs),

    /// Show the behavioral profile derived from a profile
    Profile {
        /// Profile file (JSON or YAML); the sample profile when omitted
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

/// Options for `lnav plan`
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Profile file (JSON or YAML)
    #[arg(short, long, conflicts_with_all = ["interactive", "from_store"])]
    pub profile: Option<PathBuf>,

    /// Answer profile questions on the terminal
    #[arg(short, long, conflicts_with = "from_store")]
    pub interactive: bool,

    /// Reuse the profile saved by the previous run
    #[arg(long)]
    pub from_store: bool,

    /// Task file (JSON or YAML array); the sample tasks when omitted
    #[arg(short, long)]
    pub tasks: Option<PathBuf>,

    /// Calendar source: "sample" or a JSON event file (overrides config)
    #[arg(long)]
    pub calendar: Option<String>,

    /// Output document path (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preference store path (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Operating mode (overrides config)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,
}

/// Location of the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lifenav")
        .join("logs")
        .join("lifenav.log")
}
