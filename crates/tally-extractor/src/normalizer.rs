//! Parse provider output into an ExtractedRecord

use crate::error::ExtractorError;
use tally_domain::{is_blank, ExtractedRecord};
use tracing::debug;

/// Parse the raw provider payload and attach the suggested filename
///
/// Either a complete record is returned or an error; nothing partial.
pub fn normalize_response(raw: &str) -> Result<ExtractedRecord, ExtractorError> {
    let json_str = strip_code_fence(raw);

    let mut record: ExtractedRecord = serde_json::from_str(json_str).map_err(|e| {
        debug!("Raw response that failed to parse: {}", raw);
        ExtractorError::MalformedResponse(e.to_string())
    })?;

    record
        .validate()
        .map_err(ExtractorError::MalformedResponse)?;

    for field in [
        &mut record.company,
        &mut record.date_issued,
        &mut record.service_description,
        &mut record.original_currency,
    ] {
        if field.as_deref().is_some_and(is_blank) {
            *field = None;
        }
    }

    Ok(record.with_suggested_filename())
}

/// Strip a surrounding markdown code block, if any
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip the info string (```json) up to the first newline
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
