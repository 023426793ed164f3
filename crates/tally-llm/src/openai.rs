//! OpenAI Provider Implementation
//!
//! Sends one Chat Completions request with a strict `json_schema` response
//! format and returns the content of the single completion choice.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable base URL and model
//! - No retries and no client-side timeout; the transport defaults apply
//!
//! # Examples
//!
//! ```no_run
//! use tally_llm::{OpenAiConfig, OpenAiProvider};
//!
//! let config = OpenAiConfig::new("sk-...", "gpt-4o-2024-08-06");
//! let provider = OpenAiProvider::new(config).unwrap();
//! ```

use crate::config::OpenAiConfig;
use crate::LlmError;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tally_domain::{ExtractionProvider, ExtractionUsage, PromptPair, ProviderResponse, ResponseSchema};
use tracing::debug;

/// OpenAI Chat Completions provider
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    description: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Load settings from the environment and create a provider
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Send one completion request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API cannot be reached
    /// - The API answers with a non-success status
    /// - The response has no completion choice
    /// - The model refused to answer
    pub async fn complete(
        &self,
        prompt: &PromptPair,
        schema: &ResponseSchema,
    ) -> Result<ProviderResponse, LlmError> {
        let body = build_request(&self.config.model, prompt, schema);

        debug!(
            "POST {} (model {}, schema {}, strict {})",
            self.completions_url(),
            self.config.model,
            schema.name,
            schema.strict
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        parse_completion(&text)
    }
}

impl ExtractionProvider for OpenAiProvider {
    type Error = LlmError;

    async fn extract(
        &self,
        prompt: &PromptPair,
        schema: &ResponseSchema,
    ) -> Result<ProviderResponse, Self::Error> {
        self.complete(prompt, schema).await
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

fn build_request<'a>(
    model: &'a str,
    prompt: &'a PromptPair,
    schema: &'a ResponseSchema,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: &prompt.system,
            },
            ChatMessage {
                role: "user",
                content: &prompt.user,
            },
        ],
        response_format: ResponseFormat {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: &schema.name,
                description: &schema.description,
                schema: &schema.schema,
                strict: schema.strict,
            },
        },
    }
}

fn api_error(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    LlmError::Api { status, message }
}

/// Turn a successful response body into the single choice's content
fn parse_completion(body: &str) -> Result<ProviderResponse, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let usage = parsed.usage.map(|u| ExtractionUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    let choice = parsed.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;

    if let Some(refusal) = choice.message.refusal {
        return Err(LlmError::Refused(refusal));
    }

    let content = choice.message.content.ok_or(LlmError::EmptyResponse)?;

    debug!(
        "Finish reason: {}, content length: {} chars",
        choice.finish_reason.as_deref().unwrap_or("unknown"),
        content.len()
    );

    Ok(ProviderResponse {
        content,
        usage,
        finish_reason: choice.finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt() -> PromptPair {
        PromptPair {
            system: "You are an accountant.".to_string(),
            user: "Receipt text".to_string(),
        }
    }

    fn schema() -> ResponseSchema {
        ResponseSchema {
            name: "receipt_invoice_info".to_string(),
            description: "Structured information".to_string(),
            schema: json!({"type": "object", "additionalProperties": false}),
            strict: true,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = prompt();
        let schema = schema();
        let body = serde_json::to_value(build_request("gpt-test", &prompt, &schema)).unwrap();

        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are an accountant.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "receipt_invoice_info");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(
            body["response_format"]["json_schema"]["schema"]["additionalProperties"],
            false
        );
    }

    #[test]
    fn test_parse_completion() {
        let body = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "{\"document_type\":\"Invoice\"}", "refusal": null},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
        })
        .to_string();

        let response = parse_completion(&body).unwrap();
        assert_eq!(response.content, "{\"document_type\":\"Invoice\"}");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(
            response.usage,
            Some(ExtractionUsage {
                prompt_tokens: 120,
                completion_tokens: 30,
                total_tokens: 150
            })
        );
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let body = json!({"choices": [], "usage": null}).to_string();
        assert!(matches!(parse_completion(&body), Err(LlmError::EmptyResponse)));

        let body = json!({}).to_string();
        assert!(matches!(parse_completion(&body), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn test_parse_completion_refusal() {
        let body = json!({
            "choices": [{
                "message": {"content": null, "refusal": "I can't help with that."},
                "finish_reason": "stop"
            }]
        })
        .to_string();
        match parse_completion(&body) {
            Err(LlmError::Refused(message)) => assert_eq!(message, "I can't help with that."),
            other => panic!("Expected refusal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_completion_garbage() {
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_api_error_message() {
        let body = json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}).to_string();
        match api_error(401, &body) {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }

        match api_error(502, "  upstream down \n") {
            LlmError::Api { message, .. } => assert_eq!(message, "upstream down"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_model() {
        let provider = OpenAiProvider::new(OpenAiConfig::new("sk-test", "gpt-test")).unwrap();
        assert_eq!(provider.model(), "gpt-test");
        assert_eq!(provider.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        // Nothing listens on port 1
        let config = OpenAiConfig::new("sk-test", "gpt-test").with_base_url("http://127.0.0.1:1/v1");
        let provider = OpenAiProvider::new(config).unwrap();

        let result = provider.extract(&prompt(), &schema()).await;
        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    // Integration test (requires a real key)
    #[tokio::test]
    #[ignore]
    async fn test_openai_extract_integration() {
        let provider = OpenAiProvider::from_env().unwrap();
        let result = provider.extract(&prompt(), &schema()).await;
        assert!(result.is_ok());
    }
}
