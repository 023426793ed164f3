//! HTML overview command implementation.

use super::skip_existing_output;
use crate::cli::HtmlOverviewArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::render::{render_overview, PROCESSED_AT_FORMAT};
use chrono::Local;
use std::fs;
use tally_domain::ExtractedRecord;
use tracing::info;

/// Execute the htmloverview command.
///
/// The input JSON is only read; the record is rendered exactly as stored.
pub fn execute_htmloverview(args: HtmlOverviewArgs, formatter: &Formatter) -> Result<()> {
    info!("Starting HTML overview generation for file: {}", args.input.display());

    if skip_existing_output(&args.output, formatter) {
        return Ok(());
    }

    if !args.input.is_file() {
        return Err(CliError::InvalidInput(format!(
            "Input file does not exist: {}",
            args.input.display()
        )));
    }

    let json = fs::read_to_string(&args.input)?;
    let record: ExtractedRecord = serde_json::from_str(&json)?;
    info!("Document type: {}", record.document_type);
    info!("Description: {}", record.description);

    let processed_at = Local::now().format(PROCESSED_AT_FORMAT).to_string();
    let html = render_overview(&record, &processed_at)?;
    fs::write(&args.output, html)?;

    if let Some(minor) = record.amount_minor_units {
        info!("Amount (SEK): {:.2} SEK ({} öre)", minor as f64 / 100.0, minor);
    }
    if let Some(amount) = record.original_amount {
        info!(
            "Original amount: {:.2} {}",
            amount,
            record.original_currency.as_deref().unwrap_or("units")
        );
    }
    if !record.id_fields.is_empty() {
        info!("Found {} identification fields", record.id_fields.len());
    }

    eprintln!(
        "{}",
        formatter.success(&format!("Wrote HTML overview: {}", args.output.display()))
    );
    Ok(())
}
