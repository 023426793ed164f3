//! Extract command implementation.

use super::skip_existing_output;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use tally_domain::{ExtractedRecord, ExtractionObserver, ExtractionProvider};
use tally_extractor::{validate_input, Extractor, ExtractorError, TracingObserver, ValidatedInput};
use tally_llm::OpenAiProvider;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    info!("Starting extraction for file: {}", args.input.display());

    if skip_existing_output(&args.output, formatter) {
        return Ok(());
    }

    let observer = TracingObserver;

    // Input problems are reported before credentials are looked up.
    let input = validate_input(&args.input, &config.extractor, &observer)?;

    let provider = OpenAiProvider::from_env()?;
    let extractor = Extractor::new(provider, config.extractor.clone())?;

    run_extraction(&extractor, &input, &args.output, formatter, &observer).await?;
    Ok(())
}

/// Extract `input` with `extractor`, print the record and write it to `output`.
///
/// Nothing is written unless extraction and serialization both succeed.
pub async fn run_extraction<P>(
    extractor: &Extractor<P>,
    input: &ValidatedInput,
    output: &Path,
    formatter: &Formatter,
    observer: &dyn ExtractionObserver,
) -> Result<ExtractedRecord>
where
    P: ExtractionProvider + Sync,
    ExtractorError: From<P::Error>,
{
    let record = extractor.extract_validated(input, observer).await?;
    let json = serde_json::to_string_pretty(&record)?;

    println!("{}", json);

    info!("Writing result to: {}", output.display());
    fs::write(output, format!("{}\n", json))?;

    eprintln!(
        "{}",
        formatter.extraction_summary(record.document_type.as_str(), &record.suggested_filename)
    );
    info!("Successfully wrote output to: {}", output.display());

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tally_domain::{DocumentType, NoopObserver};
    use tally_extractor::ExtractorConfig;
    use tally_llm::MockProvider;

    const RECEIPT_RESPONSE: &str = r#"{
        "document_type": "Receipt",
        "description": "Groceries",
        "company": "ICA Maxi",
        "date_issued": "2024-01-05",
        "service_description": "Food",
        "amount_minor_units": 24950,
        "original_amount": 249.50,
        "original_currency": "SEK",
        "original_vat_amount": 26.73,
        "id_fields": [{"name": "Receipt Number", "value": "0042"}]
    }"#;

    fn receipt_input(dir: &Path) -> ValidatedInput {
        let path = dir.join("receipt.txt");
        fs::write(&path, "ICA Maxi\n2024-01-05\nTotalt 249,50 kr\n").unwrap();
        validate_input(&path, &ExtractorConfig::default(), &NoopObserver).unwrap()
    }

    #[tokio::test]
    async fn test_writes_record_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = receipt_input(dir.path());
        let output = dir.path().join("receipt.json");
        let extractor = Extractor::new(MockProvider::new(RECEIPT_RESPONSE), ExtractorConfig::default()).unwrap();

        let record = run_extraction(&extractor, &input, &output, &Formatter::new(false), &NoopObserver)
            .await
            .unwrap();

        assert_eq!(record.document_type, DocumentType::Receipt);
        assert_eq!(record.suggested_filename, "2024_01_05-ica_maxi-groceries-250sek");

        let written: ExtractedRecord = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, record);
    }

    #[tokio::test]
    async fn test_failed_extraction_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = receipt_input(dir.path());
        let output = dir.path().join("receipt.json");
        let extractor = Extractor::new(MockProvider::failing("boom"), ExtractorConfig::default()).unwrap();

        let result = run_extraction(&extractor, &input, &output, &Formatter::new(false), &NoopObserver).await;

        assert!(matches!(result, Err(CliError::Extractor(ExtractorError::ProviderError(_)))));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_malformed_response_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = receipt_input(dir.path());
        let output = dir.path().join("receipt.json");
        let extractor = Extractor::new(MockProvider::new("not json"), ExtractorConfig::default()).unwrap();

        let result = run_extraction(&extractor, &input, &output, &Formatter::new(false), &NoopObserver).await;

        assert!(matches!(result, Err(CliError::Extractor(ExtractorError::MalformedResponse(_)))));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_existing_output_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("receipt.json");
        fs::write(&output, "keep me").unwrap();

        // The input does not exist; the command must stop before looking at it.
        let args = ExtractArgs {
            input: PathBuf::from("/nonexistent/receipt.txt"),
            output: output.clone(),
        };
        execute_extract(args, &Config::default(), &Formatter::new(false))
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_provider_setup() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExtractArgs {
            input: dir.path().join("missing.txt"),
            output: dir.path().join("out.json"),
        };

        let result = execute_extract(args, &Config::default(), &Formatter::new(false)).await;

        assert!(matches!(result, Err(CliError::Extractor(ExtractorError::NotFound(_)))));
        assert!(!dir.path().join("out.json").exists());
    }
}
