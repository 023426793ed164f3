//! Filename derivation
//!
//! A suggested filename has the shape
//! `<date>-<company>-<description>-<amount>`, where each part is passed
//! through [`clean`] and missing parts become `unknown`:
//!
//! ```
//! use tally_domain::{DocumentType, ExtractedRecord};
//!
//! let mut record = ExtractedRecord::new(DocumentType::Invoice, "Cloud Services");
//! record.date_issued = Some("2024-03-01".to_string());
//! record.company = Some("Acme AB".to_string());
//! record.amount_minor_units = Some(9537);
//!
//! let record = record.with_suggested_filename();
//! assert_eq!(record.suggested_filename, "2024_03_01-acme_ab-cloud_services-95sek");
//! ```

use crate::record::{ExtractedRecord, TARGET_CURRENCY};

const UNKNOWN: &str = "unknown";

/// Lowercase `s` and replace every character outside `[a-z0-9]` with `_`
///
/// Replacement is per character, so a multibyte character becomes a single
/// underscore.
///
/// ```
/// assert_eq!(tally_domain::clean("ACME Corp."), "acme_corp_");
/// ```
pub fn clean(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' })
        .collect()
}

/// Amount part of the filename
///
/// `<kronor>sek` with the minor units rounded half away from zero, or
/// `unknown` when the amount is missing or not positive.
pub fn amount_token(amount_minor_units: Option<i64>) -> String {
    match amount_minor_units {
        Some(minor) if minor > 0 => {
            let rounded = minor / 100 + i64::from(minor % 100 >= 50);
            format!("{}{}", rounded, TARGET_CURRENCY.to_lowercase())
        }
        _ => UNKNOWN.to_string(),
    }
}

/// Derive the suggested filename for a record
///
/// Ignores the record's current `suggested_filename`.
pub fn suggested_filename(record: &ExtractedRecord) -> String {
    format!(
        "{}-{}-{}-{}",
        optional_part(record.date_issued.as_deref()),
        optional_part(record.company.as_deref()),
        clean(&record.description),
        amount_token(record.amount_minor_units),
    )
}

/// Treat empty and `"."` values like a missing value
pub fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "."
}

fn optional_part(value: Option<&str>) -> String {
    match value {
        Some(v) if !is_blank(v) => clean(v),
        _ => UNKNOWN.to_string(),
    }
}
