//! Observer that forwards pipeline events to `tracing`

use tally_domain::{ExtractionEvent, ExtractionObserver};
use tracing::{debug, error, info, warn};

/// Logs every extraction event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_event(&self, event: ExtractionEvent<'_>) {
        match event {
            ExtractionEvent::InputValidated { path, size_bytes } => {
                info!("File validation successful: {} ({} bytes)", path.display(), size_bytes);
            }
            ExtractionEvent::UnexpectedExtension { path, extension } => {
                warn!(
                    "File extension '{}' is not .txt or .md, proceeding anyway: {}",
                    extension.unwrap_or(""),
                    path.display()
                );
            }
            ExtractionEvent::RequestStarted { model, system_chars, user_chars } => {
                info!("Calling extraction provider (model: {})", model);
                debug!("System prompt: {} chars, user prompt: {} chars", system_chars, user_chars);
            }
            ExtractionEvent::RequestCompleted { model, elapsed, usage, finish_reason } => {
                info!("Provider call to {} successful (took {:?})", model, elapsed);
                if let Some(usage) = usage {
                    info!(
                        "Token usage - Prompt: {}, Completion: {}, Total: {}",
                        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    );
                }
                if let Some(reason) = finish_reason {
                    debug!("Finish reason: {}", reason);
                }
            }
            ExtractionEvent::RequestFailed { model, elapsed, message } => {
                error!("Provider call to {} failed after {:?}: {}", model, elapsed, message);
            }
            ExtractionEvent::RecordExtracted { record, elapsed } => {
                info!("Extracted document type: {}", record.document_type);
                match &record.company {
                    Some(company) => info!("Extracted company: {}", company),
                    None => debug!("No company found in document"),
                }
                match &record.date_issued {
                    Some(date) => info!("Extracted date: {}", date),
                    None => debug!("No date found in document"),
                }
                match record.amount_minor_units {
                    Some(minor) => info!("Extracted amount: {} öre ({:.2} SEK)", minor, minor as f64 / 100.0),
                    None => debug!("No amount found in document"),
                }
                info!("Generated suggested filename: {}", record.suggested_filename);
                info!("Total processing time: {:?}", elapsed);
            }
        }
    }
}
