//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction pipeline and the
//! language-model backend. Implementations live in `tally-llm`.

use serde::{Deserialize, Serialize};
use std::future::Future;

/// System and user prompt sent together in one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    /// Instructions describing the extraction tasks
    pub system: String,

    /// The document to analyze
    pub user: String,
}

/// A named JSON schema the provider must constrain its output to
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    /// Schema name sent to the provider
    pub name: String,

    /// Human-readable description of the output
    pub description: String,

    /// The JSON schema document
    pub schema: serde_json::Value,

    /// Request strict conformance from the provider
    pub strict: bool,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u64,

    /// Tokens in the completion
    pub completion_tokens: u64,

    /// Sum reported by the provider
    pub total_tokens: u64,
}

/// Result of a single successful provider call
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Raw JSON text of the single completion choice
    pub content: String,

    /// Token usage, when the provider reports it
    pub usage: Option<ExtractionUsage>,

    /// Why the model stopped generating
    pub finish_reason: Option<String>,
}

/// Trait for language-model backends that support schema-constrained output
///
/// Implemented by the infrastructure layer (tally-llm). One call per
/// document; implementations must not retry internally.
pub trait ExtractionProvider {
    /// Error type for provider operations
    type Error;

    /// Send the prompt pair and schema, returning the raw JSON completion
    fn extract(
        &self,
        prompt: &PromptPair,
        schema: &ResponseSchema,
    ) -> impl Future<Output = Result<ProviderResponse, Self::Error>> + Send;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}
