//! Related-keyword suggestions for a live search dropdown.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeaheadError};
use crate::spelling::catalog::{Category, KeywordCatalog};

/// Configuration for related-keyword suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig { max_suggestions: 8 }
    }
}

impl SuggestionConfig {
    /// Check that the configured values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(TypeaheadError::invalid_config(
                "suggestion.max_suggestions must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Suggests catalog keywords that extend what the user has typed so far.
#[derive(Debug, Clone)]
pub struct KeywordSuggester {
    catalog: Arc<KeywordCatalog>,
    config: SuggestionConfig,
}

impl KeywordSuggester {
    /// Create a suggester with the default configuration.
    pub fn new(catalog: Arc<KeywordCatalog>) -> Self {
        Self::with_config(catalog, SuggestionConfig::default())
    }

    /// Create a suggester with custom configuration.
    pub fn with_config(catalog: Arc<KeywordCatalog>, config: SuggestionConfig) -> Self {
        KeywordSuggester { catalog, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Keywords containing the query, other than the query itself, in catalog order.
    pub fn related_keywords(&self, query: &str) -> Vec<String> {
        self.collect(query, None)
    }

    /// Like [`KeywordSuggester::related_keywords`], restricted to one category.
    pub fn related_in_category(&self, query: &str, category: Category) -> Vec<String> {
        self.collect(query, Some(category))
    }

    fn collect(&self, query: &str, category: Option<Category>) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }

        self.catalog
            .entries()
            .iter()
            .filter(|entry| category.is_none() || entry.category == category)
            .map(|entry| entry.keyword.as_str())
            .filter(|keyword| keyword.contains(query) && *keyword != query)
            .take(self.config.max_suggestions)
            .map(str::to_string)
            .collect()
    }
}
