//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::normalizer::normalize_response;
use crate::prompt::PromptBuilder;
use crate::schema::response_schema;
use crate::validator::{validate_input, ValidatedInput};
use std::path::Path;
use std::time::Instant;
use tally_domain::{
    ExtractedRecord, ExtractionEvent, ExtractionObserver, ExtractionProvider, ResponseSchema,
};
use tracing::debug;

/// The Extractor turns one text document into an [`ExtractedRecord`]
///
/// validate → build prompt → call provider → normalize. Each step is
/// terminal on failure; there are no retries.
pub struct Extractor<P>
where
    P: ExtractionProvider,
{
    provider: P,
    config: ExtractorConfig,
    schema: ResponseSchema,
}

impl<P> Extractor<P>
where
    P: ExtractionProvider + Sync,
    ExtractorError: From<P::Error>,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if `config` is invalid.
    pub fn new(provider: P, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            provider,
            config,
            schema: response_schema(),
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The provider requests are sent to
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate and read an input file without calling the provider
    pub fn validate(
        &self,
        path: &Path,
        observer: &dyn ExtractionObserver,
    ) -> Result<ValidatedInput, ExtractorError> {
        validate_input(path, &self.config, observer)
    }

    /// Run the whole pipeline for one file
    pub async fn extract_file(
        &self,
        path: &Path,
        observer: &dyn ExtractionObserver,
    ) -> Result<ExtractedRecord, ExtractorError> {
        let input = self.validate(path, observer)?;
        self.extract_validated(&input, observer).await
    }

    /// Run the pipeline for a file that already passed validation
    pub async fn extract_validated(
        &self,
        input: &ValidatedInput,
        observer: &dyn ExtractionObserver,
    ) -> Result<ExtractedRecord, ExtractorError> {
        debug!("Document {}: {} chars", input.path.display(), input.text.chars().count());
        self.extract_text(&input.text, observer).await
    }

    /// Run prompt building, the provider call and normalization on raw text
    pub async fn extract_text(
        &self,
        text: &str,
        observer: &dyn ExtractionObserver,
    ) -> Result<ExtractedRecord, ExtractorError> {
        let start_time = Instant::now();
        let model = self.provider.model();

        let prompt = PromptBuilder::new(text).build();

        observer.on_event(ExtractionEvent::RequestStarted {
            model,
            system_chars: prompt.system.chars().count(),
            user_chars: prompt.user.chars().count(),
        });

        let request_start = Instant::now();
        let response = match self.provider.extract(&prompt, &self.schema).await {
            Ok(response) => response,
            Err(e) => {
                let err = ExtractorError::from(e);
                let message = err.to_string();
                observer.on_event(ExtractionEvent::RequestFailed {
                    model,
                    elapsed: request_start.elapsed(),
                    message: &message,
                });
                return Err(err);
            }
        };

        observer.on_event(ExtractionEvent::RequestCompleted {
            model,
            elapsed: request_start.elapsed(),
            usage: response.usage.as_ref(),
            finish_reason: response.finish_reason.as_deref(),
        });

        debug!("Provider response length: {} chars", response.content.len());

        let record = normalize_response(&response.content)?;

        observer.on_event(ExtractionEvent::RecordExtracted {
            record: &record,
            elapsed: start_time.elapsed(),
        });

        Ok(record)
    }
}
