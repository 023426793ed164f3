//! Tally Extractor
//!
//! Turns a receipt or invoice text file into an `ExtractedRecord` using a
//! schema-constrained language-model call.
//!
//! # Architecture
//!
//! ```text
//! File → Validator → PromptBuilder + Schema → ExtractionProvider → Normalizer → ExtractedRecord
//! ```
//!
//! # Key Features
//!
//! - **Input validation**: size limit and a text/binary sniff
//! - **Fixed prompt and strict schema**: the same text always yields the same request
//! - **Single provider call**: no retries, no caching
//! - **Deterministic post-processing**: the suggested filename is always recomputed
//! - **Explicit observer**: progress and usage go to a caller-supplied `ExtractionObserver`
//!
//! # Example Usage
//!
//! ```no_run
//! use tally_extractor::{Extractor, ExtractorConfig, TracingObserver};
//! use tally_llm::MockProvider;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"document_type":"Receipt","description":"Groceries"}"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default())?;
//!
//! let record = extractor
//!     .extract_file(Path::new("receipt.txt"), &TracingObserver)
//!     .await?;
//!
//! println!("{}", record.suggested_filename);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod normalizer;
mod observer;
mod prompt;
mod schema;
mod validator;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use normalizer::normalize_response;
pub use observer::TracingObserver;
pub use prompt::PromptBuilder;
pub use schema::{response_schema, SCHEMA_DESCRIPTION, SCHEMA_NAME};
pub use validator::{sniff_binary, validate_input, ValidatedInput};
