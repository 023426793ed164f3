//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for input validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Largest accepted input file (bytes)
    pub max_file_size_bytes: u64,

    /// Leading bytes inspected for null bytes
    pub sniff_sample_bytes: usize,

    /// Null bytes tolerated in the sample before the file counts as binary
    pub max_null_bytes: usize,

    /// Control characters tolerated in the first line
    pub max_control_chars: usize,

    /// Extensions that do not trigger a warning (without the dot)
    pub expected_extensions: Vec<String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size_bytes == 0 {
            return Err("max_file_size_bytes must be greater than 0".to_string());
        }
        if self.sniff_sample_bytes == 0 {
            return Err("sniff_sample_bytes must be greater than 0".to_string());
        }
        if self.expected_extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
            return Err("expected_extensions must be non-empty and given without a leading dot".to_string());
        }
        Ok(())
    }

    /// Whether `extension` is one of the expected ones (case-insensitive)
    pub fn is_expected_extension(&self, extension: &str) -> bool {
        self.expected_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    /// 200KB limit, 512-byte sniff, `.txt` and `.md` expected
    fn default() -> Self {
        Self {
            max_file_size_bytes: 200 * 1024,
            sniff_sample_bytes: 512,
            max_null_bytes: 3,
            max_control_chars: 5,
            expected_extensions: vec!["txt".to_string(), "md".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_file_size_bytes, 204_800);
    }

    #[test]
    fn test_invalid_max_file_size() {
        let mut config = ExtractorConfig::default();
        config.max_file_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_extension() {
        let mut config = ExtractorConfig::default();
        config.expected_extensions.push(".pdf".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let config = ExtractorConfig::default();
        assert!(config.is_expected_extension("txt"));
        assert!(config.is_expected_extension("MD"));
        assert!(!config.is_expected_extension("pdf"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("max_file_size_bytes = 1024").unwrap();
        assert_eq!(config.max_file_size_bytes, 1024);
        assert_eq!(config.sniff_sample_bytes, 512);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
