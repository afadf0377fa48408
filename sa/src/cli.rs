//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SchedAssist - clarifying-question engine for LLM-parsed schedules
#[derive(Parser)]
#[command(name = "sa", version, about = "Turn free-text commitments into a complete schedule")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse free text and resolve questions interactively
    Parse {
        /// Text describing the commitments; omit to read --file
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the clarifying questions for a schedule JSON file (offline)
    Check {
        /// Path to a schedule JSON file
        schedule: PathBuf,
    },

    /// Apply one answer to a schedule JSON file (offline)
    Answer {
        /// Path to a schedule JSON file
        schedule: PathBuf,

        /// Id of the meeting or task being answered
        #[arg(long)]
        item_id: String,

        /// Question type: time, duration or course_code
        #[arg(long = "type")]
        kind: String,

        /// The answer text
        #[arg(long)]
        answer: String,

        /// Write the updated schedule back to the file
        #[arg(short, long)]
        write: bool,
    },
}
