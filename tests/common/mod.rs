//! Common test utilities for integration tests
//!
//! Provides fake embedders and generators, sample documents and temp store
//! helpers shared across the integration test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use support_rag::domain::models::config::StorageConfig;
use support_rag::{
    CompletionRequest, Config, Document, Embedder, Generator, Page, RagError, RagResult,
};

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Config whose store lives inside `dir`
pub fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage = StorageConfig {
        store_dir: dir.path().join("vector_db").display().to_string(),
        ..StorageConfig::default()
    };
    config
}

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Embeds text as keyword counts plus a small constant bias component.
///
/// Texts containing `fail_marker` fail to embed.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
    fail_marker: Option<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            fail_marker: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn model_id(&self) -> &str {
        "keyword-test-model"
    }

    fn dimension(&self) -> usize {
        self.keywords.len() + 1
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(marker) = &self.fail_marker {
            if text.contains(marker.as_str()) {
                return Err(RagError::EmbeddingFailure("simulated outage".to_string()));
            }
        }

        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = self
            .keywords
            .iter()
            .map(|k| lower.matches(k.as_str()).count() as f32)
            .collect();
        vector.push(0.05);
        Ok(vector)
    }
}

/// Embedder answering from a fixed text -> vector table; unknown text fails
pub struct TableEmbedder {
    dimension: usize,
    table: HashMap<String, Vec<f32>>,
}

impl TableEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            table: HashMap::new(),
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), vector);
        self
    }
}

#[async_trait]
impl Embedder for TableEmbedder {
    fn name(&self) -> &'static str {
        "table"
    }

    fn model_id(&self) -> &str {
        "table-test-model"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| RagError::EmbeddingFailure("connection refused".to_string()))
    }
}

/// Generator that echoes how much context it received, or fails
pub struct FakeGenerator {
    fail_with: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self {
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    fn model_id(&self) -> &str {
        "fake-chat"
    }

    async fn complete(&self, request: &CompletionRequest) -> RagResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(reason) => Err(RagError::GenerationFailure(reason.clone())),
            None => Ok(format!(
                "Answer drawn from {} context block(s).",
                request.user.matches("[Page ").count()
            )),
        }
    }
}

/// Keywords understood by [`KeywordEmbedder`] in [`sample_document`]
pub const SAMPLE_KEYWORDS: [&str; 4] = ["vpn", "password", "timesheet", "expense"];

fn paragraph(topic: &str, sentence: &str) -> String {
    format!("{topic}: {}", sentence.repeat(6))
}

/// Four-page guide, one topic per page
pub fn sample_document() -> Document {
    Document::new(
        "support_guide.txt",
        vec![
            Page::new(
                1,
                paragraph("Timesheet", "Submit your timesheet every Friday from the portal home page. "),
            ),
            Page::new(
                2,
                paragraph("VPN", "To request VPN access raise an IT ticket and install the VPN client. "),
            ),
            Page::new(
                3,
                paragraph("Password", "Reset a forgotten password from the login page using your email. "),
            ),
            Page::new(
                4,
                paragraph("Expense", "File each expense claim with receipts attached within thirty days. "),
            ),
        ],
    )
}
