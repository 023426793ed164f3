//! Error types for the Extractor

use std::path::PathBuf;
use tally_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Every variant is terminal for the current document.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input file does not exist or is not a regular file
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file exceeds the size limit
    #[error("File size ({size} bytes) exceeds maximum allowed size ({limit} bytes): {}", .path.display())]
    TooLarge {
        /// Offending file
        path: PathBuf,
        /// Size on disk
        size: u64,
        /// Configured limit
        limit: u64,
    },

    /// Input file looks binary
    #[error("File appears to be binary ({reason}), only text files are supported: {}", .path.display())]
    BinaryContent {
        /// Offending file
        path: PathBuf,
        /// What the sniff found
        reason: String,
    },

    /// Provider call failed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Provider returned no completion choice
    #[error("Provider returned no completion")]
    EmptyResponse,

    /// Provider payload does not match the record schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Reading the input failed after validation
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::EmptyResponse => ExtractorError::EmptyResponse,
            other => ExtractorError::ProviderError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::MalformedResponse(e.to_string())
    }
}
