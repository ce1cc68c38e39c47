//! Output formatting utilities for the CLI.

use serde::Serialize;

use crate::domain::models::chunking::preview;
use crate::domain::models::{Answer, BuildReport, RetrievalResult};

/// Characters of chunk text shown in previews
const PREVIEW_CHARS: usize = 100;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Result of `support-rag build`
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    #[serde(flatten)]
    pub report: BuildReport,
    pub chunks_per_page: f64,
}

impl From<BuildReport> for BuildOutput {
    fn from(report: BuildReport) -> Self {
        Self {
            chunks_per_page: report.chunks_per_page(),
            report,
        }
    }
}

impl CommandOutput for BuildOutput {
    fn to_human(&self) -> String {
        let r = &self.report;
        let mut lines = vec![
            format!("Vector store built from {}", r.source_document),
            format!("  Pages:              {}", r.total_pages),
            format!("  Characters:         {}", r.total_chars),
            format!(
                "  Chunks:             {} ({:.1} per page)",
                r.total_chunks, self.chunks_per_page
            ),
            format!("  Avg chunk length:   {} chars", r.average_chunk_chars),
            format!("  Dimension:          {} ({})", r.dimension, r.embedding_model),
            format!("  Index file:         {}", r.index_path.display()),
            format!("  Chunk store:        {}", r.chunks_path.display()),
        ];
        if r.failed_embeddings > 0 {
            lines.push(format!(
                "  Warning: {} chunk(s) failed to embed and were stored as zero vectors",
                r.failed_embeddings
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// One retrieved chunk as shown to the user
#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub rank: usize,
    pub page_number: u32,
    pub chunk_index: usize,
    pub similarity_score: f32,
    pub preview: String,
}

impl MatchOutput {
    fn from_results(results: &[RetrievalResult], limit: usize) -> Vec<Self> {
        results
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, r)| Self {
                rank: i + 1,
                page_number: r.page_number,
                chunk_index: r.chunk_index,
                similarity_score: r.similarity_score,
                preview: preview(r.text.trim(), PREVIEW_CHARS),
            })
            .collect()
    }

    fn to_line(&self) -> String {
        format!(
            "  {}. Page {} (Score: {:.3}) {}",
            self.rank,
            self.page_number,
            self.similarity_score,
            self.preview.replace('\n', " ")
        )
    }
}

/// Result of `support-rag ask`
#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub question: String,
    pub answer: String,
    pub source_pages: Vec<u32>,
    pub outcome: String,
    /// Retrieval or generation failed and `answer` is an apology
    pub degraded: bool,
    #[serde(skip)]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<MatchOutput>,
}

impl AskOutput {
    /// `preview_count` best matches are included when `show_context` is set
    pub fn new(question: &str, answer: Answer, show_context: bool, preview_count: usize) -> Self {
        let context = if show_context {
            MatchOutput::from_results(&answer.retrieved, preview_count)
        } else {
            Vec::new()
        };

        Self {
            question: question.to_string(),
            outcome: answer.outcome.to_string(),
            degraded: answer.outcome.is_failure(),
            reference: answer.reference_line(),
            source_pages: answer.source_pages,
            answer: answer.text,
            context,
        }
    }
}

impl CommandOutput for AskOutput {
    fn to_human(&self) -> String {
        let mut out = String::new();

        if !self.context.is_empty() {
            out.push_str(&format!("Top {} matches:\n", self.context.len()));
            for m in &self.context {
                out.push_str(&m.to_line());
                out.push('\n');
            }
            out.push('\n');
        }

        out.push_str(&self.answer);

        if let Some(reference) = &self.reference {
            out.push_str(&format!("\n\nReference: {reference}"));
        }

        out
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Result of `support-rag search`
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub question: String,
    pub threshold: f32,
    pub matches: Vec<MatchOutput>,
}

impl SearchOutput {
    pub fn new(question: &str, results: &[RetrievalResult], threshold: f32) -> Self {
        Self {
            question: question.to_string(),
            threshold,
            matches: MatchOutput::from_results(results, results.len()),
        }
    }
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        if self.matches.is_empty() {
            return "No matching chunks found.".to_string();
        }

        let above = self
            .matches
            .iter()
            .filter(|m| m.similarity_score > self.threshold)
            .count();

        let mut lines: Vec<String> = self.matches.iter().map(MatchOutput::to_line).collect();
        lines.push(format!(
            "\n{above} of {} match(es) above the {:.2} relevance threshold",
            self.matches.len(),
            self.threshold
        ));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::QueryOutcome;

    fn result(page: u32, score: f32) -> RetrievalResult {
        RetrievalResult {
            text: format!("text on page {page}\nsecond line"),
            page_number: page,
            similarity_score: score,
            chunk_index: page as usize,
        }
    }

    #[test]
    fn test_ask_output_human() {
        let answer = Answer {
            text: "Open a ticket.".to_string(),
            source_pages: vec![2, 5],
            outcome: QueryOutcome::Answered,
            retrieved: vec![result(2, 0.9), result(5, 0.7), result(1, 0.4), result(3, 0.2)],
        };
        let out = AskOutput::new("vpn?", answer, true, 3);

        assert_eq!(out.context.len(), 3);
        let human = out.to_human();
        assert!(human.contains("1. Page 2 (Score: 0.900) text on page 2 second line"));
        assert!(human.ends_with("Open a ticket.\n\nReference: Pages 2, 5"));
    }

    #[test]
    fn test_ask_output_json_omits_context_by_default() {
        let answer = Answer::without_sources("Nothing found.", QueryOutcome::NoRelevantContext)
            .with_retrieved(vec![result(1, 0.1)]);
        let json = AskOutput::new("q", answer, false, 3).to_json();

        assert_eq!(json["outcome"], "no_relevant_context");
        assert_eq!(json["degraded"], false);
        assert_eq!(json["source_pages"], serde_json::json!([]));
        assert!(json.get("context").is_none());
        assert!(json.get("reference").is_none());
    }

    #[test]
    fn test_ask_output_flags_failed_answers() {
        let answer = Answer::without_sources(
            "Sorry, I encountered an error while generating the answer: timeout",
            QueryOutcome::GenerationFailed,
        );
        let out = AskOutput::new("q", answer, false, 3);

        assert!(out.degraded);
        assert_eq!(out.to_json()["degraded"], true);
        assert!(!out.to_human().contains("Reference:"));
    }

    #[test]
    fn test_search_output() {
        let out = SearchOutput::new("q", &[result(2, 0.8), result(4, 0.5)], 0.5);
        assert!(out.to_human().contains("1 of 2 match(es) above the 0.50 relevance threshold"));
        assert_eq!(SearchOutput::new("q", &[], 0.5).to_human(), "No matching chunks found.");
    }
}
