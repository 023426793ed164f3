//! Tally LLM Provider Layer
//!
//! Implementations of the `ExtractionProvider` trait from `tally-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI Chat Completions with strict JSON-schema output
//!
//! # Examples
//!
//! ```
//! use tally_llm::MockProvider;
//! use tally_domain::{ExtractionProvider, PromptPair, ResponseSchema};
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"document_type":"None","description":"Memo"}"#);
//! let prompt = PromptPair { system: "sys".into(), user: "doc".into() };
//! let schema = ResponseSchema {
//!     name: "test".into(),
//!     description: "test".into(),
//!     schema: serde_json::json!({}),
//!     strict: true,
//! };
//! let response = provider.extract(&prompt, &schema).await.unwrap();
//! assert!(response.content.contains("Memo"));
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod openai;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tally_domain::{ExtractionProvider, ExtractionUsage, PromptPair, ProviderResponse, ResponseSchema};
use thiserror::Error;

pub use config::OpenAiConfig;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The API answered with a non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or the raw body
        message: String,
    },

    /// The API answered without any completion choice
    #[error("Response contained no completion choices")]
    EmptyResponse,

    /// The model declined to answer
    #[error("Model refused the request: {0}")]
    Refused(String),

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or invalid provider settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Communication(e.to_string())
        }
    }
}

/// What the mock answers with
#[derive(Debug, Clone)]
enum MockReply {
    Content(String),
    NoChoices,
    Error(String),
}

/// A request captured by [`MockProvider`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Prompt pair that was sent
    pub prompt: PromptPair,
    /// Schema that was sent
    pub schema: ResponseSchema,
}

/// Mock LLM provider for deterministic testing
///
/// Returns a pre-configured reply without making any network calls, and
/// records every request it receives.
///
/// # Examples
///
/// ```
/// use tally_llm::MockProvider;
///
/// let provider = MockProvider::new("{}");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: MockReply,
    model: String,
    usage: Option<ExtractionUsage>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider that answers every request with `content`
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Content(content.into()))
    }

    /// A provider whose responses contain no completion choice
    pub fn empty() -> Self {
        Self::with_reply(MockReply::NoChoices)
    }

    /// A provider that fails every request with a communication error
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Error(message.into()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            model: "mock-model".to_string(),
            usage: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Report this usage with every successful response
    pub fn with_usage(mut self, usage: ExtractionUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Override the reported model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock_requests().last().cloned()
    }

    fn lock_requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"document_type":"None","description":"Mock document"}"#)
    }
}

impl ExtractionProvider for MockProvider {
    type Error = LlmError;

    async fn extract(
        &self,
        prompt: &PromptPair,
        schema: &ResponseSchema,
    ) -> Result<ProviderResponse, Self::Error> {
        self.lock_requests().push(RecordedRequest {
            prompt: prompt.clone(),
            schema: schema.clone(),
        });

        match &self.reply {
            MockReply::Content(content) => Ok(ProviderResponse {
                content: content.clone(),
                usage: self.usage,
                finish_reason: Some("stop".to_string()),
            }),
            MockReply::NoChoices => Err(LlmError::EmptyResponse),
            MockReply::Error(message) => Err(LlmError::Communication(message.clone())),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
