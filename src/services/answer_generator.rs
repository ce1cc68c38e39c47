//! Answer synthesis from assembled context.
//!
//! Every path returns a displayable [`Answer`]; generator failures become an
//! apology carrying the reason, with no sources.

use std::sync::Arc;

use super::context_builder::AssembledContext;
use crate::domain::errors::RagError;
use crate::domain::models::config::GenerationConfig;
use crate::domain::models::{Answer, QueryOutcome};
use crate::domain::ports::{CompletionRequest, Generator};

/// Wraps a [`Generator`] with the fixed prompts and sampling settings
#[derive(Clone)]
pub struct AnswerGenerator {
    generator: Arc<dyn Generator>,
    guide_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerGenerator {
    pub fn new(generator: Arc<dyn Generator>, config: &GenerationConfig) -> Self {
        Self {
            generator,
            guide_name: config.guide_name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Name of the guide used in prompts and canned replies
    pub fn guide_name(&self) -> &str {
        &self.guide_name
    }

    /// System instruction sent with every question
    pub fn system_prompt(&self) -> String {
        let guide = &self.guide_name;
        format!(
            "You are an AI assistant specialized in answering questions about the {guide}.

Your role:
1. Answer questions based ONLY on the provided context from the {guide}
2. Provide step-by-step instructions when needed
3. Mention page numbers when referencing specific information
4. If information is not in the context, say \"I don't have that information in the support guide\"
5. Be professional, clear, and concise
6. Format your answers with proper structure (numbered steps, bullet points when appropriate)

Guidelines:
- Always cite the relevant section or page when providing information
- For technical issues, suggest troubleshooting steps
- Recommend raising IT tickets when necessary"
        )
    }

    /// User message embedding the context and the question
    pub fn user_message(&self, question: &str, context: &str, total_pages: usize) -> String {
        format!(
            "Document Context (from {} - {total_pages} pages total):\n{context}\n\n\
             User Question: {question}\n\n\
             Please provide a detailed answer based on the context above. \
             Include specific steps if the question is about a process. \
             Mention relevant page numbers when providing information.",
            self.guide_name
        )
    }

    /// Reply used when no retrieved chunk clears the threshold
    pub fn no_context_answer(&self) -> Answer {
        Answer::without_sources(
            format!(
                "I couldn't find relevant information in the {} to answer this question. \
                 Please try rephrasing or ask about topics covered in the guide.",
                self.guide_name
            ),
            QueryOutcome::NoRelevantContext,
        )
    }

    /// Reply used when the question could not be embedded or searched
    pub fn retrieval_failed_answer(&self, error: &RagError) -> Answer {
        Answer::without_sources(
            format!(
                "Sorry, I couldn't search the {} right now: {}",
                self.guide_name,
                reason(error)
            ),
            QueryOutcome::RetrievalFailed,
        )
    }

    /// Generate an answer from non-empty context.
    ///
    /// Sources are the context's cited pages, not parsed from the reply.
    pub async fn generate(
        &self,
        question: &str,
        context: &AssembledContext,
        total_pages: usize,
    ) -> Answer {
        let request = CompletionRequest {
            system: self.system_prompt(),
            user: self.user_message(question, &context.text, total_pages),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let result = self.generator.complete(&request).await.and_then(|text| {
            if text.trim().is_empty() {
                Err(RagError::GenerationFailure("empty completion".to_string()))
            } else {
                Ok(text)
            }
        });

        match result {
            Ok(text) => Answer {
                text,
                source_pages: context.cited_pages.clone(),
                outcome: QueryOutcome::Answered,
                retrieved: Vec::new(),
            },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    model = self.generator.model_id(),
                    "answer generation failed"
                );
                Answer::without_sources(
                    format!(
                        "Sorry, I encountered an error while generating the answer: {}",
                        reason(&e)
                    ),
                    QueryOutcome::GenerationFailed,
                )
            }
        }
    }
}

/// Inner message of the failure without the taxonomy prefix
fn reason(error: &RagError) -> String {
    match error {
        RagError::EmbeddingFailure(msg)
        | RagError::SearchFailure(msg)
        | RagError::GenerationFailure(msg) => msg.clone(),
        other => other.to_string(),
    }
}
