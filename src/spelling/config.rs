//! Configuration for the typeahead engine.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::corrector::CorrectorConfig;
use crate::spelling::suggest::SuggestionConfig;

/// Top-level settings, usually read from a JSON file.
///
/// Every field has a default, so a file only needs the values it changes:
///
/// ```json
/// { "suggestion": { "max_suggestions": 5 }, "catalog_path": "keywords.txt" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadConfig {
    /// Query correction settings.
    pub corrector: CorrectorConfig,
    /// Related-keyword settings.
    pub suggestion: SuggestionConfig,
    /// Catalog file to load instead of the built-in keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl TypeaheadConfig {
    /// Load and validate a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: TypeaheadConfig = serde_json::from_reader(reader)?;
        config.validate()?;

        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check every section of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.corrector.validate()?;
        self.suggestion.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypeaheadError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = TypeaheadConfig::default();
        assert_eq!(config.corrector.min_query_len, 2);
        assert_eq!(config.corrector.short_keyword_len, 4);
        assert_eq!(config.corrector.short_keyword_threshold, 1);
        assert_eq!(config.corrector.long_keyword_threshold, 2);
        assert_eq!(config.suggestion.max_suggestions, 8);
        assert_eq!(config.catalog_path, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"suggestion": {{"max_suggestions": 5}}, "catalog_path": "keywords.txt"}}"#
        )
        .unwrap();
        temp_file.flush().unwrap();

        let config = TypeaheadConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.suggestion.max_suggestions, 5);
        assert_eq!(config.corrector, CorrectorConfig::default());
        assert_eq!(config.catalog_path, Some(PathBuf::from("keywords.txt")));
    }

    #[test]
    fn test_load_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"suggestion": {{"max_suggestions": 0}}}}"#).unwrap();
        temp_file.flush().unwrap();

        let error = TypeaheadConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(error, TypeaheadError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();
        temp_file.flush().unwrap();

        let error = TypeaheadConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(error, TypeaheadError::Json(_)));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = TypeaheadConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TypeaheadConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
