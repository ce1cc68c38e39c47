//! Retrieval domain models

use serde::{Deserialize, Serialize};

/// A chunk returned by similarity search, with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Chunk text
    pub text: String,

    /// Page the chunk came from
    pub page_number: u32,

    /// Cosine similarity to the query, in [-1, 1]
    pub similarity_score: f32,

    /// Ordinal of the chunk in the store
    pub chunk_index: usize,
}

impl RetrievalResult {
    /// Whether this result clears a relevance threshold (strictly greater)
    pub fn is_relevant(&self, threshold: f32) -> bool {
        self.similarity_score > threshold
    }
}

/// Per-query retrieval knobs; defaults come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Number of nearest neighbours to fetch
    pub top_k: usize,

    /// Minimum similarity (exclusive) for a chunk to enter the context
    pub threshold: f32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            threshold: 0.5,
        }
    }
}

impl QueryOptions {
    /// Override top-k when a value is given
    #[must_use]
    pub fn with_top_k(mut self, top_k: Option<usize>) -> Self {
        if let Some(k) = top_k {
            self.top_k = k;
        }
        self
    }

    /// Override the threshold when a value is given
    #[must_use]
    pub fn with_threshold(mut self, threshold: Option<f32>) -> Self {
        if let Some(t) = threshold {
            self.threshold = t;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f32) -> RetrievalResult {
        RetrievalResult {
            text: "text".to_string(),
            page_number: 1,
            similarity_score: score,
            chunk_index: 0,
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!result(0.5).is_relevant(0.5));
        assert!(result(0.500_001).is_relevant(0.5));
        assert!(!result(0.3).is_relevant(0.5));
    }

    #[test]
    fn test_query_options_overrides() {
        let opts = QueryOptions::default()
            .with_top_k(Some(8))
            .with_threshold(None);
        assert_eq!(opts.top_k, 8);
        assert!((opts.threshold - 0.5).abs() < f32::EPSILON);
    }
}
