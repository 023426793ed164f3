//! Tally CLI - Extract structured information from receipts and invoices.

use clap::Parser;
use tally_cli::commands;
use tally_cli::logging::init_tracing;
use tally_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> tally_cli::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let color_enabled = !cli.no_color && config.settings.color;
    if !color_enabled {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, color_enabled, &config.settings.log_level);

    let formatter = Formatter::new(color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, &formatter).await?;
        }
        Command::HtmlOverview(args) => {
            commands::execute_htmloverview(args, &formatter)?;
        }
    }

    Ok(())
}
