//! Record module - the structured result of one extraction

use crate::filename::suggested_filename;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency that `amount_minor_units` is expressed in
pub const TARGET_CURRENCY: &str = "SEK";

/// Maximum length of [`ExtractedRecord::description`], in characters
pub const MAX_DESCRIPTION_CHARS: usize = 50;

/// Classification of a document
///
/// The serialized names are the exact strings the model is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Not a financial document
    None,

    /// A request for payment
    Invoice,

    /// Proof of a completed payment
    Receipt,
}

impl DocumentType {
    /// All variants, in schema order
    pub const ALL: [DocumentType; 3] = [DocumentType::None, DocumentType::Invoice, DocumentType::Receipt];

    /// Get the document type name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::None => "None",
            DocumentType::Invoice => "Invoice",
            DocumentType::Receipt => "Receipt",
        }
    }

    /// Whether this document asks for or proves a payment
    pub fn is_financial(&self) -> bool {
        !matches!(self, DocumentType::None)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

/// An identifier found on the document (invoice number, customer ID, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdField {
    /// Kind of identifier, e.g. "Invoice Number"
    pub name: String,

    /// The identifier itself
    pub value: String,
}

impl IdField {
    /// Create a new identifier pair
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Structured information extracted from a receipt or invoice
///
/// Every field is always present in serialized output; absent optional
/// values are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractedRecord {
    /// Classification, always present
    pub document_type: DocumentType,

    /// Short accountant-friendly category, always present
    pub description: String,

    /// Company offering the service and requesting payment
    pub company: Option<String>,

    /// Issue date, `YYYY-MM-DD`
    pub date_issued: Option<String>,

    /// What was paid for
    pub service_description: Option<String>,

    /// Total in hundredths of [`TARGET_CURRENCY`]
    pub amount_minor_units: Option<i64>,

    /// Total in the currency printed on the document
    pub original_amount: Option<f64>,

    /// ISO 4217 code of `original_amount`
    pub original_currency: Option<String>,

    /// VAT in the currency printed on the document
    pub original_vat_amount: Option<f64>,

    /// Identifiers found on the document, in document order
    #[serde(default)]
    pub id_fields: Vec<IdField>,

    /// Derived locally; see [`crate::filename`]
    #[serde(default)]
    pub suggested_filename: String,
}

impl ExtractedRecord {
    /// Create a record with only the mandatory fields set
    pub fn new(document_type: DocumentType, description: impl Into<String>) -> Self {
        let mut record = Self {
            document_type,
            description: description.into(),
            company: None,
            date_issued: None,
            service_description: None,
            amount_minor_units: None,
            original_amount: None,
            original_currency: None,
            original_vat_amount: None,
            id_fields: Vec::new(),
            suggested_filename: String::new(),
        };
        record.suggested_filename = suggested_filename(&record);
        record
    }

    /// Recompute `suggested_filename` from the other fields
    ///
    /// Whatever value the field held before is discarded.
    pub fn with_suggested_filename(mut self) -> Self {
        self.suggested_filename = suggested_filename(&self);
        self
    }

    /// Amount in whole-currency units (e.g. kronor), unrounded
    pub fn amount_major_units(&self) -> Option<f64> {
        self.amount_minor_units.map(|minor| minor as f64 / 100.0)
    }

    /// Check the invariants the schema cannot enforce on its own
    pub fn validate(&self) -> Result<(), String> {
        let description_chars = self.description.chars().count();
        if description_chars > MAX_DESCRIPTION_CHARS {
            return Err(format!(
                "description is {} chars (max: {})",
                description_chars, MAX_DESCRIPTION_CHARS
            ));
        }
        if let Some(amount) = self.amount_minor_units {
            if amount < 0 {
                return Err(format!("amount_minor_units must be non-negative, got {}", amount));
            }
        }
        for (field, value) in [
            ("original_amount", self.original_amount),
            ("original_vat_amount", self.original_vat_amount),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(format!("{} must be a finite number", field));
            }
        }
        Ok(())
    }
}
