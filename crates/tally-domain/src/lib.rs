//! Tally Domain Layer
//!
//! Core types for receipt and invoice extraction. This crate holds the
//! record shape returned by the language model, the deterministic filename
//! derivation applied after the model responds, and the trait seams that
//! the provider and observer implementations plug into.
//!
//! ## Key Concepts
//!
//! - **ExtractedRecord**: the schema-constrained output for one document
//! - **Minor units**: amounts are carried as integer hundredths of SEK
//! - **Suggested filename**: a pure function of the other record fields,
//!   always recomputed locally
//! - **ExtractionProvider**: the capability `extract(prompt, schema) -> JSON`
//! - **ExtractionObserver**: explicitly passed sink for progress and telemetry
//!
//! ## Architecture
//!
//! Infrastructure (HTTP providers, logging, file output) lives in other
//! crates. Only `serde` is pulled in here because the record is itself the
//! wire format.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filename;
pub mod observer;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use filename::{amount_token, clean, is_blank, suggested_filename};
pub use observer::{ExtractionEvent, ExtractionObserver, NoopObserver};
pub use record::{DocumentType, ExtractedRecord, IdField, MAX_DESCRIPTION_CHARS, TARGET_CURRENCY};
pub use traits::{ExtractionProvider, ExtractionUsage, PromptPair, ProviderResponse, ResponseSchema};
