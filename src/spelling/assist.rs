//! Search-box assistance: typo correction plus related keywords in one pass.
//!
//! This mirrors what the storefront does when a search is submitted: the
//! query is corrected first, the search runs with the corrected query when
//! there is one, the page tells the user what was replaced, and the related
//! keyword bar is filled for the query that was actually searched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::spelling::catalog::KeywordCatalog;
use crate::spelling::config::TypeaheadConfig;
use crate::spelling::corrector::QueryCorrector;
use crate::spelling::suggest::KeywordSuggester;

/// Outcome of assisting one submitted query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAssist {
    /// Query to search with.
    pub query: String,
    /// What the user typed, present only when it was corrected.
    pub original: Option<String>,
    /// Related keywords for `query`.
    pub related: Vec<String>,
}

impl SearchAssist {
    /// Whether the submitted query was replaced by a correction.
    pub fn was_corrected(&self) -> bool {
        self.original.is_some()
    }

    /// Notice shown above corrected search results.
    pub fn notice(&self) -> Option<String> {
        self.original.as_ref().map(|original| {
            format!(
                "'{original}' 일치하는 항목이 존재하지 않아 '{}'(으)로 수정한 검색 결과입니다.",
                self.query
            )
        })
    }
}

/// Corrector and suggester sharing one catalog.
#[derive(Debug, Clone)]
pub struct SearchAssistant {
    corrector: QueryCorrector,
    suggester: KeywordSuggester,
}

impl SearchAssistant {
    /// Create an assistant over a catalog.
    pub fn new(catalog: Arc<KeywordCatalog>, config: &TypeaheadConfig) -> Self {
        SearchAssistant {
            corrector: QueryCorrector::with_config(catalog.clone(), config.corrector.clone()),
            suggester: KeywordSuggester::with_config(catalog, config.suggestion.clone()),
        }
    }

    /// The underlying corrector.
    pub fn corrector(&self) -> &QueryCorrector {
        &self.corrector
    }

    /// The underlying suggester.
    pub fn suggester(&self) -> &KeywordSuggester {
        &self.suggester
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Arc<KeywordCatalog> {
        self.corrector.catalog()
    }

    /// See [`QueryCorrector::correct_query`].
    pub fn correct_query(&self, query: &str) -> Option<String> {
        self.corrector.correct_query(query)
    }

    /// See [`KeywordSuggester::related_keywords`].
    pub fn related_keywords(&self, query: &str) -> Vec<String> {
        self.suggester.related_keywords(query)
    }

    /// Correct a submitted query and collect related keywords for the result.
    pub fn assist(&self, query: &str) -> SearchAssist {
        match self.corrector.correct_query(query) {
            Some(corrected) => SearchAssist {
                related: self.suggester.related_keywords(&corrected),
                query: corrected,
                original: Some(query.to_string()),
            },
            None => SearchAssist {
                query: query.to_string(),
                original: None,
                related: self.suggester.related_keywords(query),
            },
        }
    }
}
