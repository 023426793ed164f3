//! JSON schema for schema-constrained output
//!
//! Strict mode requires every property to be listed as required and every
//! object to forbid additional properties, so optional fields are typed as
//! `[T, "null"]` instead of being left out.

use serde_json::{json, Value};
use tally_domain::{DocumentType, ResponseSchema, MAX_DESCRIPTION_CHARS};

/// Schema name sent to the provider
pub const SCHEMA_NAME: &str = "receipt_invoice_info";

/// Schema description sent to the provider
pub const SCHEMA_DESCRIPTION: &str = "Structured information extracted from a receipt or invoice";

/// The response schema for [`tally_domain::ExtractedRecord`]
///
/// `suggested_filename` is not part of the schema; it is derived locally.
pub fn response_schema() -> ResponseSchema {
    ResponseSchema {
        name: SCHEMA_NAME.to_string(),
        description: SCHEMA_DESCRIPTION.to_string(),
        schema: record_schema(),
        strict: true,
    }
}

fn record_schema() -> Value {
    let document_types: Vec<&str> = DocumentType::ALL.iter().map(|t| t.as_str()).collect();
    let description = format!(
        "Mandatory accountant-friendly description, at most {} characters: for None documents \
         describe what it is about, for Invoice/Receipt give a generic service category \
         (e.g. 'AI Services', 'Cloud Services')",
        MAX_DESCRIPTION_CHARS
    );

    json!({
        "type": "object",
        "properties": {
            "document_type": {
                "type": "string",
                "enum": document_types,
                "description": "Classification of the document as None, Invoice, or Receipt"
            },
            "description": {
                "type": "string",
                "description": description
            },
            "company": nullable("string", "The company that owns the service being offered and is requesting payment, null if not found"),
            "date_issued": nullable("string", "The date the document was issued in YYYY-MM-DD format, null if not found"),
            "service_description": nullable("string", "Description of the service or items paid for, null if not found"),
            "amount_minor_units": nullable("integer", "Total amount in Swedish öre (hundredths of SEK), null if not found"),
            "original_amount": nullable("number", "The total amount in the original currency, null if not found"),
            "original_currency": nullable("string", "The ISO 4217 currency code of the original amount (e.g. 'EUR', 'USD', 'SEK'), null if not found"),
            "original_vat_amount": nullable("number", "The VAT amount in the original currency, null if not found"),
            "id_fields": {
                "type": "array",
                "description": "Identification fields found in the document (invoice numbers, receipt numbers, customer IDs, ...). Can be empty.",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The type or name of the identifier (e.g. 'Invoice Number', 'Customer ID')"
                        },
                        "value": {
                            "type": "string",
                            "description": "The identifier value"
                        }
                    },
                    "required": ["name", "value"],
                    "additionalProperties": false
                }
            }
        },
        "required": [
            "document_type",
            "description",
            "company",
            "date_issued",
            "service_description",
            "amount_minor_units",
            "original_amount",
            "original_currency",
            "original_vat_amount",
            "id_fields"
        ],
        "additionalProperties": false
    })
}

fn nullable(kind: &str, description: &str) -> Value {
    json!({
        "type": [kind, "null"],
        "description": description
    })
}
