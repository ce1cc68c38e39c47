//! Answer domain models

use serde::{Deserialize, Serialize};

use super::retrieval::RetrievalResult;

/// How a query terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The generator produced an answer from retrieved context
    Answered,

    /// Nothing cleared the similarity threshold; canned reply returned
    NoRelevantContext,

    /// Query embedding or index search failed
    RetrievalFailed,

    /// The generator call failed
    GenerationFailed,
}

impl QueryOutcome {
    /// Returns true for the degraded error terminals
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::RetrievalFailed | Self::GenerationFailed)
    }
}

impl std::fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Answered => write!(f, "answered"),
            Self::NoRelevantContext => write!(f, "no_relevant_context"),
            Self::RetrievalFailed => write!(f, "retrieval_failed"),
            Self::GenerationFailed => write!(f, "generation_failed"),
        }
    }
}

/// The resolved result of one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Displayable answer text; never empty
    pub text: String,

    /// Cited pages, ascending and deduplicated
    pub source_pages: Vec<u32>,

    /// Terminal state of the query
    pub outcome: QueryOutcome,

    /// Chunks returned by the search, before threshold filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retrieved: Vec<RetrievalResult>,
}

impl Answer {
    /// Build an answer that carries no sources
    pub fn without_sources(text: impl Into<String>, outcome: QueryOutcome) -> Self {
        Self {
            text: text.into(),
            source_pages: Vec::new(),
            outcome,
            retrieved: Vec::new(),
        }
    }

    /// Attach the raw retrieval results
    #[must_use]
    pub fn with_retrieved(mut self, retrieved: Vec<RetrievalResult>) -> Self {
        self.retrieved = retrieved;
        self
    }

    /// "Pages 2, 5" style reference line, or `None` when nothing was cited
    pub fn reference_line(&self) -> Option<String> {
        if self.source_pages.is_empty() {
            return None;
        }
        let pages = self
            .source_pages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("Pages {pages}"))
    }
}
