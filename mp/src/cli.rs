//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// mealplan - weekly meal plans from what is already in your kitchen
#[derive(Parser)]
#[command(
    name = "mp",
    about = "Weekly meal planner client for the planning service",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Planning service base URL (overrides config and MEALPLAN_API_BASE)
    #[arg(long = "api-base", global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Subcommand to execute (defaults to the interactive UI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive planner
    Ui,

    /// List the diet options offered by the service
    Diets,

    /// List saved plans
    History {
        /// Number of saved plans to fetch (1-100)
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },

    /// Print the plan of a saved history entry
    Show {
        /// History entry id
        id: String,
    },

    /// Generate a weekly plan
    Plan {
        /// Available item (repeat for each item)
        #[arg(short, long = "item", value_name = "ITEM", required = true)]
        items: Vec<String>,

        /// Weekly goal, e.g. "increase protein intake"
        #[arg(short, long)]
        goal: String,

        /// Diet preference as listed by `mp diets`
        #[arg(short, long)]
        diet: String,

        /// Description of a custom diet (used with the Custom Diet option)
        #[arg(long, value_name = "TEXT")]
        custom: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Download the latest plan as CSV
    Export {
        /// File to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the CSV and dashboard links
    Links,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mealplan")
        .join("logs")
        .join("mealplan.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Output format for plan output
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}
