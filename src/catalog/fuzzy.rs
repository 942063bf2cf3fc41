//! Fuzzy matching of product names against catalog process names.
//!
//! Scores are on a 0-100 scale. A candidate is accepted only when its score
//! strictly exceeds the threshold; ties go to the earliest candidate in
//! listing order.
//!
//! Catalog names sharing a common suffix (`"apple production"`,
//! `"rice production"`) are compared with that suffix removed. Scoring the
//! full strings would let the shared suffix dominate the edit distance.

use crate::models::CatalogEntry;

/// Similarity function on a 0-100 scale
pub type Scorer = fn(&str, &str) -> f64;

/// Best of plain and token-sorted normalized Levenshtein similarity,
/// case-insensitive.
pub fn similarity_score(query: &str, candidate: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let candidate = candidate.trim().to_lowercase();

    let plain = strsim::normalized_levenshtein(&query, &candidate);
    let sorted = strsim::normalized_levenshtein(&sort_tokens(&query), &sort_tokens(&candidate));

    plain.max(sorted) * 100.0
}

/// `name` without a trailing `suffix` (case-insensitive, surrounding
/// whitespace ignored). Names that do not carry the suffix, or consist of
/// nothing else, are returned unchanged.
pub fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    let trimmed = name.trim_end();
    let suffix = suffix.trim();
    if suffix.is_empty() || trimmed.len() <= suffix.len() {
        return name;
    }

    let split = trimmed.len() - suffix.len();
    match trimmed.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(suffix) => {
            let head = trimmed[..split].trim_end();
            if head.is_empty() {
                name
            } else {
                head
            }
        }
        _ => name,
    }
}

fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: f64,
    scorer: Scorer,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scorer: similarity_score,
        }
    }

    /// Replace the similarity function
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Highest-scoring candidate, first one wins on equal scores
    pub fn best_candidate<'a>(
        &self,
        query: &str,
        candidates: &'a [CatalogEntry],
    ) -> Option<(&'a CatalogEntry, f64)> {
        self.best_candidate_by(query, candidates, |entry| entry.name.as_str())
    }

    /// Like [`FuzzyMatcher::best_candidate`], scoring `query` against the
    /// text `key` extracts from each candidate
    pub fn best_candidate_by<'a, F>(
        &self,
        query: &str,
        candidates: &'a [CatalogEntry],
        key: F,
    ) -> Option<(&'a CatalogEntry, f64)>
    where
        F: Fn(&'a CatalogEntry) -> &'a str,
    {
        let mut best: Option<(&'a CatalogEntry, f64)> = None;
        for candidate in candidates {
            let score = (self.scorer)(query, key(candidate));
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best
    }

    /// Best candidate if it clears the threshold
    pub fn find_match<'a>(
        &self,
        query: &str,
        candidates: &'a [CatalogEntry],
    ) -> Option<(&'a CatalogEntry, f64)> {
        self.best_candidate(query, candidates)
            .filter(|(_, score)| *score > self.threshold)
    }

    /// Best candidate by its name with `suffix` removed, if it clears the threshold
    pub fn find_match_stripped<'a>(
        &self,
        query: &str,
        candidates: &'a [CatalogEntry],
        suffix: &str,
    ) -> Option<(&'a CatalogEntry, f64)> {
        self.best_candidate_by(query, candidates, |entry| strip_suffix(&entry.name, suffix))
            .filter(|(_, score)| *score > self.threshold)
    }
}
