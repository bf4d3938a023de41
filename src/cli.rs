//! CLI interface for the resume crafter

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(name = "resume-crafter")]
#[command(about = "Build an ATS-friendly resume from the command line")]
#[command(long_about = "Edit a structured resume, check its ATS compatibility score and export it as text, HTML, JSON or PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resume as plain text
    Show,

    /// Show the ATS compatibility score
    Score {
        /// Include the per-section breakdown and every warning
        #[arg(short, long)]
        detailed: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check required fields
    Validate,

    /// Export the resume to a file
    Export {
        /// Output format: text, html, json, pdf
        format: String,

        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Write the plain-text resume to stdout for pasting elsewhere
    Copy,

    /// Replace the resume with a JSON document
    Import {
        /// Path to a resume JSON file
        file: PathBuf,
    },

    /// Set a field, e.g. `personal.email` or `experience.1.company`
    Set {
        path: String,
        value: String,
    },

    /// Append an empty entry to a section
    Add {
        /// experience, education, projects, certifications or skills
        section: String,
    },

    /// Remove an entry (positions start at 1)
    Remove {
        section: String,
        position: usize,
    },

    /// Move an entry to another position
    Move {
        section: String,
        from: usize,
        to: usize,
    },

    /// Manage the bullet points of an experience entry
    Bullet {
        #[command(subcommand)]
        action: BulletAction,
    },

    /// Restore the example resume
    Reset {
        /// Start from an empty resume instead
        #[arg(long)]
        empty: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum BulletAction {
    /// Append a bullet point
    Add {
        /// Experience entry position
        entry: usize,
        text: String,
    },

    /// Remove a bullet point
    Remove {
        /// Experience entry position
        entry: usize,
        bullet: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "html" => Ok(OutputFormat::Html),
        "json" => Ok(OutputFormat::Json),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!("Invalid output format: {}. Supported: text, html, json, pdf", format)),
    }
}
