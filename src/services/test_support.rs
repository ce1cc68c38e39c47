//! In-crate fakes for service unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::Chunk;
use crate::domain::ports::{CompletionRequest, Embedder, Generator};
use crate::infrastructure::vector::{FlatIndex, StoreMetadata, VectorStore};

/// Embedder answering from a fixed text -> vector table
pub struct StubEmbedder {
    dimension: usize,
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            table: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), vector);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| RagError::EmbeddingFailure(format!("service unavailable for {text:?}")))
    }
}

/// Generator returning a canned reply, or failing
pub struct StubGenerator {
    reply: Result<String, String>,
    last_request: Mutex<Option<CompletionRequest>>,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            last_request: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            last_request: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for StubGenerator {
    fn model_id(&self) -> &str {
        "stub-chat"
    }

    async fn complete(&self, request: &CompletionRequest) -> RagResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply
            .clone()
            .map_err(RagError::GenerationFailure)
    }
}

pub fn chunk(index: usize, page: u32, text: &str) -> Chunk {
    Chunk {
        text: text.to_string(),
        page_number: page,
        chunk_index: index,
        char_start: 0,
        char_end: text.chars().count(),
    }
}

/// Three chunks on pages {1, 1, 2}; against the query `[1, 0, 0]` they score
/// 0.3, 0.0 and 0.9.
pub fn three_chunk_store() -> VectorStore {
    let vectors = vec![
        vec![0.3, (1.0_f32 - 0.09).sqrt(), 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.9, (1.0_f32 - 0.81).sqrt(), 0.0],
    ];
    let chunks = vec![
        chunk(0, 1, "Resetting your password from the login page."),
        chunk(1, 1, "Office opening hours and holidays."),
        chunk(2, 2, "To request VPN access, open an IT ticket."),
    ];
    VectorStore::new(
        FlatIndex::build(3, vectors).unwrap(),
        chunks,
        StoreMetadata::new("guide.txt", 2, "stub-model", 3),
    )
    .unwrap()
}
