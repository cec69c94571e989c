//! Levenshtein distance calculation for spelling correction.
//!
//! Distances are measured in logical characters (extended grapheme clusters),
//! so a precomposed Hangul syllable, or a syllable spelled out as conjoining
//! jamo, counts as a single unit rather than several bytes or code points.

use std::cmp::min;

use unicode_segmentation::UnicodeSegmentation;

/// Split a string into its logical characters.
pub fn graphemes(s: &str) -> Vec<&str> {
    s.graphemes(true).collect()
}

/// Number of logical characters in a string.
pub fn char_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Calculate the Levenshtein distance between two strings.
/// This is the minimum number of single-character edits (insertions, deletions, or substitutions)
/// required to change one word into another.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    distance_units(&graphemes(a), &graphemes(b))
}

/// Full-matrix distance over pre-segmented units.
///
/// Row `i` walks the first `i` units of `b`, column `j` the first `j` units of `a`.
#[allow(clippy::needless_range_loop)]
fn distance_units(a: &[&str], b: &[&str]) -> usize {
    let len_a = a.len();
    let len_b = b.len();

    if len_a == 0 {
        return len_b;
    }
    if len_b == 0 {
        return len_a;
    }

    let mut matrix = vec![vec![0; len_a + 1]; len_b + 1];

    // Initialize first row and column
    for i in 0..=len_b {
        matrix[i][0] = i;
    }
    for j in 0..=len_a {
        matrix[0][j] = j;
    }

    for i in 1..=len_b {
        for j in 1..=len_a {
            matrix[i][j] = if b[i - 1] == a[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + min(
                    matrix[i - 1][j - 1], // substitution
                    min(
                        matrix[i][j - 1], // insertion
                        matrix[i - 1][j], // deletion
                    ),
                )
            };
        }
    }

    matrix[len_b][len_a]
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
/// Returns None if the distance exceeds the threshold.
pub fn levenshtein_distance_threshold(a: &str, b: &str, threshold: usize) -> Option<usize> {
    distance_units_threshold(&graphemes(a), &graphemes(b), threshold)
}

#[allow(clippy::needless_range_loop)]
fn distance_units_threshold(a: &[&str], b: &[&str], threshold: usize) -> Option<usize> {
    let len_a = a.len();
    let len_b = b.len();

    // The distance is never smaller than the length difference
    if len_a.abs_diff(len_b) > threshold {
        return None;
    }

    if len_a == 0 || len_b == 0 {
        let distance = len_a.max(len_b);
        return (distance <= threshold).then_some(distance);
    }

    // Use only two rows for space optimization
    let mut prev_row: Vec<usize> = (0..=len_a).collect();
    let mut curr_row = vec![0; len_a + 1];

    for i in 1..=len_b {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len_a {
            curr_row[j] = if b[i - 1] == a[j - 1] {
                prev_row[j - 1]
            } else {
                1 + min(prev_row[j - 1], min(curr_row[j - 1], prev_row[j]))
            };
            min_in_row = min(min_in_row, curr_row[j]);
        }

        // Row minima never decrease, so the final cell cannot come back under
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len_a];
    (distance <= threshold).then_some(distance)
}

/// Calculate normalized Levenshtein similarity as a ratio between 0.0 and 1.0.
/// 1.0 means identical strings, 0.0 means completely different.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let a_units = graphemes(a);
    let b_units = graphemes(b);
    ratio_from_distance(
        distance_units(&a_units, &b_units),
        a_units.len().max(b_units.len()),
    )
}

fn ratio_from_distance(distance: usize, max_len: usize) -> f64 {
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (distance as f64 / max_len as f64)
}

/// Measures one query against many candidates.
///
/// The query is segmented once up front instead of once per candidate.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher<'a> {
    query: &'a str,
    query_units: Vec<&'a str>,
}

impl<'a> LevenshteinMatcher<'a> {
    /// Create a new matcher for the given query string.
    pub fn new(query: &'a str) -> Self {
        LevenshteinMatcher {
            query,
            query_units: graphemes(query),
        }
    }

    /// Get the original query string.
    pub fn query(&self) -> &str {
        self.query
    }

    /// Length of the query in logical characters.
    pub fn query_len(&self) -> usize {
        self.query_units.len()
    }

    /// Calculate distance to a candidate string.
    pub fn distance(&self, candidate: &str) -> usize {
        distance_units(&self.query_units, &graphemes(candidate))
    }

    /// Calculate distance with threshold for early termination.
    pub fn distance_threshold(&self, candidate: &str, threshold: usize) -> Option<usize> {
        distance_units_threshold(&self.query_units, &graphemes(candidate), threshold)
    }

    /// Calculate similarity ratio (0.0 to 1.0, higher is more similar).
    pub fn similarity(&self, candidate: &str) -> f64 {
        let candidate_units = graphemes(candidate);
        ratio_from_distance(
            distance_units(&self.query_units, &candidate_units),
            self.query_units.len().max(candidate_units.len()),
        )
    }

    /// Check if a candidate is within the given edit distance threshold.
    pub fn is_match(&self, candidate: &str, max_distance: usize) -> bool {
        self.distance_threshold(candidate, max_distance).is_some()
    }
}
