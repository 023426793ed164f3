//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tally - Extract structured information from receipts and invoices.
///
/// Reads receipt or invoice data from text or markdown files and writes the
/// extracted fields as JSON. The JSON can then be turned into a printable
/// HTML overview.
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract structured information from a receipt or invoice file
    Extract(ExtractArgs),

    /// Generate an HTML overview from extracted JSON data
    #[command(name = "htmloverview")]
    HtmlOverview(HtmlOverviewArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Path to the input file (.txt or .md)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the output JSON file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the htmloverview command.
#[derive(Debug, Parser)]
pub struct HtmlOverviewArgs {
    /// Path to the input JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the output HTML file
    #[arg(short, long)]
    pub output: PathBuf,
}
