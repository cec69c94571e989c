//! Query correction and keyword suggestion for storefront search.
//!
//! This module powers the search box: "did you mean" correction of mistyped
//! queries through edit distance against a keyword catalog, and related
//! keywords for the live-typing dropdown.

pub mod assist;
pub mod catalog;
pub mod config;
pub mod corrector;
pub mod levenshtein;
pub mod suggest;

// Re-export commonly used types
pub use assist::*;
pub use catalog::*;
pub use config::*;
pub use corrector::*;
pub use levenshtein::*;
pub use suggest::*;
