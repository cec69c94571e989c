//! "Did you mean?" correction of search queries against the keyword catalog.

use std::sync::Arc;

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeaheadError};
use crate::spelling::catalog::KeywordCatalog;
use crate::spelling::levenshtein::{LevenshteinMatcher, char_len};

/// Largest edit threshold accepted by [`CorrectorConfig::validate`].
pub const MAX_THRESHOLD: usize = 16;

/// Configuration for the query corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Queries shorter than this (in characters) are never corrected.
    pub min_query_len: usize,
    /// Keywords up to this many characters use the short threshold.
    pub short_keyword_len: usize,
    /// Maximum edit distance for short keywords.
    pub short_keyword_threshold: usize,
    /// Maximum edit distance for keywords longer than `short_keyword_len`.
    pub long_keyword_threshold: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            min_query_len: 2,
            short_keyword_len: 4,
            short_keyword_threshold: 1,
            long_keyword_threshold: 2,
        }
    }
}

impl CorrectorConfig {
    /// Edit distance allowed for a keyword of the given length.
    pub fn threshold_for(&self, keyword_len: usize) -> usize {
        if keyword_len > self.short_keyword_len {
            self.long_keyword_threshold
        } else {
            self.short_keyword_threshold
        }
    }

    /// Check that the configured values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.min_query_len == 0 {
            return Err(TypeaheadError::invalid_config(
                "corrector.min_query_len must be at least 1",
            ));
        }
        if self.short_keyword_threshold > MAX_THRESHOLD
            || self.long_keyword_threshold > MAX_THRESHOLD
        {
            return Err(TypeaheadError::invalid_config(format!(
                "corrector thresholds must not exceed {MAX_THRESHOLD}"
            )));
        }
        Ok(())
    }
}

/// Result of correcting one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Query as entered.
    pub original: String,
    /// Suggested keyword, if the query looks like a typo of one.
    pub corrected: Option<String>,
    /// Edit distance between the query and the suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

impl CorrectionResult {
    /// Create a result with no correction.
    pub fn new(original: String) -> Self {
        CorrectionResult {
            original,
            corrected: None,
            distance: None,
        }
    }

    /// Whether a correction was found.
    pub fn is_corrected(&self) -> bool {
        self.corrected.is_some()
    }

    /// Get the corrected query or original if no correction.
    pub fn query(&self) -> &str {
        self.corrected.as_deref().unwrap_or(&self.original)
    }
}

/// Finds the catalog keyword a mistyped query was most likely meant to be.
///
/// A query is left alone when it is too short to judge, or when it overlaps
/// any keyword as a substring in either direction. Otherwise the keyword with
/// the smallest edit distance within its length-scaled threshold wins, the
/// earliest one in catalog order on ties.
#[derive(Debug, Clone)]
pub struct QueryCorrector {
    catalog: Arc<KeywordCatalog>,
    config: CorrectorConfig,
}

impl QueryCorrector {
    /// Create a corrector with the default configuration.
    pub fn new(catalog: Arc<KeywordCatalog>) -> Self {
        Self::with_config(catalog, CorrectorConfig::default())
    }

    /// Create a corrector with custom configuration.
    pub fn with_config(catalog: Arc<KeywordCatalog>, config: CorrectorConfig) -> Self {
        QueryCorrector { catalog, config }
    }

    /// The catalog corrections are drawn from.
    pub fn catalog(&self) -> &Arc<KeywordCatalog> {
        &self.catalog
    }

    /// The active configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Return the corrected keyword for a query, or `None` if it needs no correction.
    pub fn correct_query(&self, query: &str) -> Option<String> {
        self.best_match(query).map(|(keyword, _)| keyword.to_string())
    }

    /// Correct a query, keeping the original and the edit distance.
    pub fn correct(&self, query: &str) -> CorrectionResult {
        let mut result = CorrectionResult::new(query.to_string());
        if let Some((keyword, distance)) = self.best_match(query) {
            result.corrected = Some(keyword.to_string());
            result.distance = Some(distance);
        }
        result
    }

    /// Correct many independent queries in parallel, preserving input order.
    pub fn correct_batch<S>(&self, queries: &[S]) -> Vec<CorrectionResult>
    where
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.correct(query.as_ref()))
            .collect()
    }

    fn best_match(&self, query: &str) -> Option<(&str, usize)> {
        let matcher = LevenshteinMatcher::new(query);
        if matcher.query_len() < self.config.min_query_len {
            return None;
        }

        let mut best: Option<(&str, usize)> = None;

        for keyword in self.catalog.keywords() {
            if keyword.contains(query) || query.contains(keyword) {
                debug!("query {query:?} overlaps keyword {keyword:?}, no correction");
                return None;
            }

            let threshold = self.config.threshold_for(char_len(keyword));
            if let Some(distance) = matcher.distance_threshold(keyword, threshold) {
                trace!("candidate {keyword:?} at distance {distance}");
                if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                    best = Some((keyword, distance));
                }
            }
        }

        if let Some((keyword, distance)) = best {
            debug!("corrected {query:?} to {keyword:?} (distance {distance})");
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::catalog::BuiltinCatalog;

    fn storefront() -> QueryCorrector {
        QueryCorrector::new(Arc::new(BuiltinCatalog::storefront()))
    }

    fn corrector_for(keywords: &[&str]) -> QueryCorrector {
        QueryCorrector::new(Arc::new(KeywordCatalog::from_keywords(
            keywords.iter().copied(),
        )))
    }

    #[test]
    fn test_short_queries_are_not_corrected() {
        let corrector = storefront();
        assert_eq!(corrector.correct_query(""), None);
        assert_eq!(corrector.correct_query("a"), None);
        assert_eq!(corrector.correct_query("모"), None);
    }

    #[test]
    fn test_substring_short_circuit() {
        let corrector = storefront();
        // query inside a keyword
        assert_eq!(corrector.correct_query("노트북"), None);
        assert_eq!(corrector.correct_query("게이밍"), None);
        // keyword inside the query
        assert_eq!(corrector.correct_query("저모니터완전다름"), None);
        assert_eq!(corrector.correct_query("맛있는 라면"), None);
    }

    #[test]
    fn test_overlap_aborts_even_after_a_candidate() {
        let corrector = corrector_for(&["abcd"]);
        assert_eq!(corrector.correct_query("abcx"), Some("abcd".to_string()));

        // "abcd" is already a candidate when "abcxyz" turns up as an overlap
        let corrector = corrector_for(&["abcd", "abcxyz"]);
        assert_eq!(corrector.correct_query("abcx"), None);
    }

    #[test]
    fn test_typo_correction() {
        let corrector = storefront();
        assert_eq!(corrector.correct_query("모니타"), Some("모니터".to_string()));
        assert_eq!(corrector.correct_query("냉잠고"), Some("냉장고".to_string()));
        assert_eq!(corrector.correct_query("세탁긔"), Some("세탁기".to_string()));
        assert_eq!(
            corrector.correct_query("노이즈캔슬링 이어펀"),
            Some("노이즈캔슬링 이어폰".to_string())
        );
    }

    #[test]
    fn test_threshold_scales_with_keyword_length() {
        let corrector = corrector_for(&["abcd"]);
        assert_eq!(corrector.correct_query("abxd"), Some("abcd".to_string()));
        assert_eq!(corrector.correct_query("axyd"), None);

        let corrector = corrector_for(&["abcde"]);
        assert_eq!(corrector.correct_query("axcye"), Some("abcde".to_string()));
        assert_eq!(corrector.correct_query("axyze"), None);
    }

    #[test]
    fn test_smallest_distance_wins() {
        // distance 2 to the first keyword, 1 to the second
        let corrector = corrector_for(&["abcdxy", "abcdef"]);
        assert_eq!(corrector.correct_query("abcdeg"), Some("abcdef".to_string()));
        assert_eq!(corrector.correct("abcdeg").distance, Some(1));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let corrector = corrector_for(&["abcd", "abce"]);
        assert_eq!(corrector.correct_query("abcf"), Some("abcd".to_string()));

        let corrector = corrector_for(&["abce", "abcd"]);
        assert_eq!(corrector.correct_query("abcf"), Some("abce".to_string()));
    }

    #[test]
    fn test_far_queries_are_not_corrected() {
        let corrector = storefront();
        assert_eq!(corrector.correct_query("자전거"), None);
        assert_eq!(corrector.correct_query("완전히 다른 검색어"), None);
    }

    #[test]
    fn test_correction_result() {
        let corrector = storefront();

        let result = corrector.correct("모니타");
        assert!(result.is_corrected());
        assert_eq!(result.original, "모니타");
        assert_eq!(result.query(), "모니터");
        assert_eq!(result.distance, Some(1));

        let result = corrector.correct("노트북");
        assert!(!result.is_corrected());
        assert_eq!(result.query(), "노트북");
        assert_eq!(result.distance, None);
    }

    #[test]
    fn test_correction_result_json() {
        let corrector = storefront();

        let json = serde_json::to_value(corrector.correct("노트북")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "original": "노트북", "corrected": null })
        );

        let json = serde_json::to_value(corrector.correct("모니타")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "original": "모니타", "corrected": "모니터", "distance": 1 })
        );
    }

    #[test]
    fn test_correct_batch_preserves_order() {
        let corrector = storefront();
        let queries = ["모니타", "노트북", "냉잠고", "", "세탁긔"];

        let results = corrector.correct_batch(&queries);
        let corrected: Vec<Option<&str>> =
            results.iter().map(|r| r.corrected.as_deref()).collect();
        assert_eq!(
            corrected,
            vec![Some("모니터"), None, Some("냉장고"), None, Some("세탁기")]
        );
        assert_eq!(results[3].original, "");
    }

    #[test]
    fn test_custom_config() {
        let config = CorrectorConfig {
            min_query_len: 4,
            ..Default::default()
        };
        let corrector =
            QueryCorrector::with_config(Arc::new(BuiltinCatalog::storefront()), config);
        assert_eq!(corrector.correct_query("모니타"), None);
    }

    #[test]
    fn test_config_threshold_for() {
        let config = CorrectorConfig::default();
        assert_eq!(config.threshold_for(3), 1);
        assert_eq!(config.threshold_for(4), 1);
        assert_eq!(config.threshold_for(5), 2);
        assert!(config.validate().is_ok());

        let config = CorrectorConfig {
            min_query_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CorrectorConfig {
            long_keyword_threshold: 17,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let corrector = corrector_for(&[]);
        assert_eq!(corrector.correct_query("모니타"), None);
    }
}
