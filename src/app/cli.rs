//! Command-Line Interface

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Swing Engine - correlate swing-sensor logs and project carry distance
#[derive(Parser, Debug)]
#[command(name = "swing-engine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the daily squared-up-rate series from an exported batch
    Analyze {
        /// Input batch file (JSON with motion, contact, and sessions)
        #[arg(short, long)]
        input: PathBuf,

        /// Only include days on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Only include days on or before this date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<NaiveDate>,

        /// Emit JSON instead of the human-readable table
        #[arg(long)]
        json: bool,
    },

    /// Project carry distance for each cohort pitch speed
    Project {
        /// Athlete's average swing speed in mph
        #[arg(short, long)]
        swing_speed: f64,

        /// Free-text skill level (e.g. "high school", "ncaa", "pro")
        #[arg(short, long, default_value = "high school")]
        level: String,

        /// Emit JSON instead of the human-readable table
        #[arg(long)]
        json: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the default config file location
    Path,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
