//! Provider settings loaded from the environment

use crate::LlmError;
use secrecy::{ExposeSecret, Secret};
use tracing::{debug, info, warn};

/// Environment variable holding the API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_KEY";

/// Environment variable selecting the model
pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";

/// Model used when `OPENAI_MODEL` is unset
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for [`crate::OpenAiProvider`]
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token
    pub api_key: Secret<String>,

    /// Model identifier
    pub model: String,

    /// Base URL, without trailing slash
    pub base_url: String,
}

impl OpenAiConfig {
    /// Create settings with an explicit key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point requests at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load settings from the process environment
    ///
    /// A `.env` file in the working directory is read first if one exists.
    /// Variables already set in the environment take precedence over it.
    pub fn from_env() -> Result<Self, LlmError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Could not load .env file: {}", e),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::Config(format!(
                    "{} environment variable is required (set it in the environment or in a .env file)",
                    API_KEY_ENV_VAR
                ))
            })?;

        let model = match lookup(MODEL_ENV_VAR).filter(|m| !m.trim().is_empty()) {
            Some(model) => {
                info!("Using OpenAI model: {}", model);
                model
            }
            None => {
                warn!(
                    "{} environment variable is not set, defaulting to {}",
                    MODEL_ENV_VAR, DEFAULT_MODEL
                );
                DEFAULT_MODEL.to_string()
            }
        };

        let config = Self::new(api_key, model);
        let config = match lookup(BASE_URL_ENV_VAR).filter(|u| !u.trim().is_empty()) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        };

        debug!("OpenAI API key: sk-...{}", config.key_suffix());
        Ok(config)
    }

    /// Last four characters of the key, for logs
    pub fn key_suffix(&self) -> String {
        let key = self.api_key.expose_secret();
        let tail: Vec<char> = key.chars().rev().take(4).collect();
        tail.into_iter().rev().collect()
    }
}
