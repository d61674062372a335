//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pp - preparation planner
#[derive(Parser)]
#[command(
    name = "pp",
    about = "Turn a preparation goal into activities and a day-by-day schedule",
    version,
    after_help = "Logs are written to: ~/.local/share/prepplanner/logs/prepplanner.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Break a goal into preparation activities
    Analyze {
        /// What you are preparing for
        description: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Analyze a goal and build a schedule for it in one go
    Plan {
        /// What you are preparing for
        description: String,

        /// Preferences file (YAML or JSON); defaults are used when omitted
        #[arg(short, long)]
        prefs: Option<PathBuf>,

        /// Number of days to schedule
        #[arg(short, long)]
        days: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a preferences file skeleton
    PrefsTemplate,

    /// Interactive session
    Repl,
}

/// Output format for analyze/plan
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Path of the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prepplanner")
        .join("logs")
        .join("prepplanner.log")
}
