//! Input validation
//!
//! Checks that a file exists, fits the size limit and looks like text. The
//! text check is a heuristic: it samples the leading bytes for null bytes and
//! the first line for control characters, so a binary file with a clean
//! prefix will pass.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tally_domain::{ExtractionEvent, ExtractionObserver};
use tracing::debug;

/// A file that passed validation, with its contents
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    /// Path that was validated
    pub path: PathBuf,

    /// Size on disk
    pub size_bytes: u64,

    /// File contents; invalid UTF-8 is replaced
    pub text: String,

    /// Non-fatal findings
    pub warnings: Vec<String>,
}

/// Validate `path` and read its contents
pub fn validate_input(
    path: &Path,
    config: &ExtractorConfig,
    observer: &dyn ExtractionObserver,
) -> Result<ValidatedInput, ExtractorError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ExtractorError::NotFound(path.to_path_buf()),
        _ => ExtractorError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(ExtractorError::NotFound(path.to_path_buf()));
    }

    let size_bytes = metadata.len();
    if size_bytes > config.max_file_size_bytes {
        return Err(ExtractorError::TooLarge {
            path: path.to_path_buf(),
            size: size_bytes,
            limit: config.max_file_size_bytes,
        });
    }

    // Size is bounded above, so reading the whole file is fine
    let bytes = fs::read(path).map_err(|e| ExtractorError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(reason) = sniff_binary(&bytes, config) {
        return Err(ExtractorError::BinaryContent {
            path: path.to_path_buf(),
            reason,
        });
    }

    let mut warnings = Vec::new();
    let extension = path.extension().and_then(|e| e.to_str());
    if !extension.is_some_and(|e| config.is_expected_extension(e)) {
        observer.on_event(ExtractionEvent::UnexpectedExtension { path, extension });
        warnings.push(format!(
            "File extension '{}' is not one of [{}], proceeding anyway",
            extension.unwrap_or(""),
            config.expected_extensions.join(", ")
        ));
    }

    observer.on_event(ExtractionEvent::InputValidated { path, size_bytes });
    debug!("Validated {} ({} bytes)", path.display(), size_bytes);

    Ok(ValidatedInput {
        path: path.to_path_buf(),
        size_bytes,
        text: String::from_utf8_lossy(&bytes).into_owned(),
        warnings,
    })
}

/// Return why `bytes` look binary, or `None` if they look like text
pub fn sniff_binary(bytes: &[u8], config: &ExtractorConfig) -> Option<String> {
    let sample = &bytes[..bytes.len().min(config.sniff_sample_bytes)];
    let null_count = sample.iter().filter(|&&b| b == 0).count();
    if null_count > config.max_null_bytes {
        return Some(format!(
            "{} null bytes in the first {} bytes",
            null_count,
            sample.len()
        ));
    }

    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    let control_count = first_line
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
        .count();
    if control_count > config.max_control_chars {
        return Some(format!("{} control characters in the first line", control_count));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tally_domain::NoopObserver;
    use tempfile::{Builder, NamedTempFile};

    fn temp_file(suffix: &str, contents: &[u8]) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_valid_text_file() {
        let file = temp_file(".txt", b"Invoice #123\nTotal: 95.37 SEK\n");
        let input = validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver).unwrap();
        assert_eq!(input.size_bytes, 30);
        assert!(input.text.contains("95.37 SEK"));
        assert!(input.warnings.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let result = validate_input(&path, &ExtractorConfig::default(), &NoopObserver);
        assert!(matches!(result, Err(ExtractorError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_input(dir.path(), &ExtractorConfig::default(), &NoopObserver);
        assert!(matches!(result, Err(ExtractorError::NotFound(_))));
    }

    #[test]
    fn test_too_large() {
        let file = temp_file(".txt", &vec![b'a'; 200 * 1024 + 1]);
        let result = validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver);
        match result {
            Err(ExtractorError::TooLarge { size, limit, .. }) => {
                assert_eq!(size, 204_801);
                assert_eq!(limit, 204_800);
            }
            other => panic!("Expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        let file = temp_file(".txt", &vec![b'a'; 200 * 1024]);
        assert!(validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver).is_ok());
    }

    #[test]
    fn test_binary_content() {
        let file = temp_file(".txt", &[0x89, b'P', b'N', b'G', 0, 0, 0, 0, 0x0d, 0x0a]);
        let result = validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver);
        assert!(matches!(result, Err(ExtractorError::BinaryContent { .. })));
    }

    #[test]
    fn test_unexpected_extension_warns() {
        let file = temp_file(".csv", b"date,amount\n2024-03-01,95.37\n");
        let input = validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver).unwrap();
        assert_eq!(input.warnings.len(), 1);
        assert!(input.warnings[0].contains("csv"));
    }

    #[test]
    fn test_uppercase_extension_is_expected() {
        let file = temp_file(".MD", b"# Receipt\n");
        let input = validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver).unwrap();
        assert!(input.warnings.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_read_lossily() {
        let file = temp_file(".txt", b"Caf\xe9 receipt\n");
        let input = validate_input(file.path(), &ExtractorConfig::default(), &NoopObserver).unwrap();
        assert!(input.text.starts_with("Caf"));
        assert!(input.text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_sniff_allows_few_nulls() {
        let config = ExtractorConfig::default();
        assert_eq!(sniff_binary(b"abc\0def\0ghi\0", &config), None);
        assert!(sniff_binary(b"abc\0\0\0\0", &config).is_some());
    }

    #[test]
    fn test_sniff_ignores_nulls_past_sample() {
        let config = ExtractorConfig::default();
        let mut bytes = vec![b'a'; 512];
        bytes.push(b'\n');
        bytes.extend_from_slice(&[0; 16]);
        assert_eq!(sniff_binary(&bytes, &config), None);
    }

    #[test]
    fn test_sniff_control_chars_in_first_line() {
        let config = ExtractorConfig::default();
        // Five are tolerated, six are not
        assert_eq!(sniff_binary(b"a\x01\x02\x03\x04\x05b\n", &config), None);
        assert!(sniff_binary(b"a\x01\x02\x03\x04\x05\x06b\n", &config).is_some());
        // Tabs and carriage returns do not count
        assert_eq!(sniff_binary(b"\t\t\t\t\t\t\t\r\n", &config), None);
        // Only the first line is inspected
        assert_eq!(sniff_binary(b"clean\n\x01\x02\x03\x04\x05\x06\x07", &config), None);
    }

    #[test]
    fn test_empty_file_is_text() {
        assert_eq!(sniff_binary(b"", &ExtractorConfig::default()), None);
    }
}
