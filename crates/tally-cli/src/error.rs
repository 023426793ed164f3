//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction pipeline error
    #[error("Failed to extract information: {0}")]
    Extractor(#[from] tally_extractor::ExtractorError),

    /// Provider setup error
    #[error("Failed to initialize AI provider: {0}")]
    Llm(#[from] tally_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTML template error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
