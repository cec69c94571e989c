//! # Typeahead
//!
//! Typo correction and related-keyword suggestion for storefront search.
//!
//! ## Features
//!
//! - Levenshtein distance over grapheme clusters, so Hangul syllables count as one character
//! - "Did you mean?" correction with keyword-length scaled thresholds
//! - Related keywords for a live search dropdown
//! - Keyword catalogs from built-in lists, text or JSON files, or product names
//!
//! ```
//! use std::sync::Arc;
//!
//! use typeahead::prelude::*;
//!
//! let catalog = Arc::new(BuiltinCatalog::storefront());
//! let corrector = QueryCorrector::new(catalog.clone());
//! let suggester = KeywordSuggester::new(catalog);
//!
//! assert_eq!(corrector.correct_query("모니타").as_deref(), Some("모니터"));
//! assert_eq!(suggester.related_keywords("라면"), vec!["신라면", "진라면", "컵라면"]);
//! ```

pub mod cli;
pub mod error;
pub mod spelling;

pub mod prelude {
    pub use crate::error::{Result, TypeaheadError};
    pub use crate::spelling::{
        BuiltinCatalog, CatalogEntry, Category, CorrectionResult, CorrectorConfig,
        KeywordCatalog, KeywordSuggester, QueryCorrector, SearchAssist, SearchAssistant,
        SuggestionConfig, TypeaheadConfig,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
