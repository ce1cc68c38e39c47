//! Context assembly from retrieval results.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::models::RetrievalResult;

/// Separator placed between context blocks
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Context handed to the generator, with the pages it cites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssembledContext {
    /// Page-tagged blocks joined by [`BLOCK_SEPARATOR`]
    pub text: String,
    /// Pages contributing to `text`, ascending and deduplicated
    pub cited_pages: Vec<u32>,
    /// Number of results that cleared the threshold
    pub included: usize,
}

impl AssembledContext {
    /// True when no result cleared the threshold
    pub fn is_empty(&self) -> bool {
        self.included == 0
    }
}

/// Keep results scoring strictly above `threshold` and format them as
/// `[Page n]:` blocks, preserving retrieval order.
pub fn build_context(results: &[RetrievalResult], threshold: f32) -> AssembledContext {
    let relevant: Vec<&RetrievalResult> =
        results.iter().filter(|r| r.is_relevant(threshold)).collect();

    let text = relevant
        .iter()
        .map(|r| format!("[Page {}]:\n{}", r.page_number, r.text))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    let cited_pages: BTreeSet<u32> = relevant.iter().map(|r| r.page_number).collect();

    tracing::debug!(
        retrieved = results.len(),
        included = relevant.len(),
        threshold,
        "context assembled"
    );

    AssembledContext {
        text,
        cited_pages: cited_pages.into_iter().collect(),
        included: relevant.len(),
    }
}
