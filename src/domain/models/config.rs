use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::chunking::ChunkingConfig;
use super::retrieval::QueryOptions;

/// Main configuration structure for support-rag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Answer generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Retrieval defaults
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Store and document locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry policy for external calls
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Expected vector dimension
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; falls back to `OPENAI_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

const fn default_dimension() -> usize {
    1536
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

const fn default_embedding_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            dimension: default_dimension(),
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_embedding_timeout_secs(),
        }
    }
}

/// Answer generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Chat model identifier
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; falls back to `OPENAI_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in the completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,

    /// Human name of the guide, used in prompts and canned replies
    #[serde(default = "default_guide_name")]
    pub guide_name: String,
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    800
}

const fn default_generation_timeout_secs() -> u64 {
    60
}

fn default_guide_name() -> String {
    "Portal Support Guide".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            base_url: default_base_url(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_generation_timeout_secs(),
            guide_name: default_guide_name(),
        }
    }
}

/// Retrieval defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Number of chunks to fetch per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Exclusive similarity cutoff for context inclusion
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// How many retrieved chunks `ask --show-context` prints
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,
}

const fn default_top_k() -> usize {
    5
}

const fn default_similarity_threshold() -> f32 {
    0.5
}

const fn default_preview_count() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_threshold: default_similarity_threshold(),
            preview_count: default_preview_count(),
        }
    }
}

impl RetrievalConfig {
    /// Default per-query options
    pub const fn query_options(&self) -> QueryOptions {
        QueryOptions {
            top_k: self.top_k,
            threshold: self.similarity_threshold,
        }
    }
}

/// Store and document locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Directory holding the persisted store
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Source document (form-feed separated text or JSON pages)
    #[serde(default = "default_document_path")]
    pub document_path: String,

    /// Index file name inside `store_dir`
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Chunk store file name inside `store_dir`
    #[serde(default = "default_chunks_file")]
    pub chunks_file: String,
}

fn default_store_dir() -> String {
    "vector_db".to_string()
}

fn default_document_path() -> String {
    "data/support_guide.txt".to_string()
}

fn default_index_file() -> String {
    "vector.index".to_string()
}

fn default_chunks_file() -> String {
    "chunks.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            document_path: default_document_path(),
            index_file: default_index_file(),
            chunks_file: default_chunks_file(),
        }
    }
}

impl StorageConfig {
    /// Full path of the index file
    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.store_dir).join(&self.index_file)
    }

    /// Full path of the chunk store file
    pub fn chunks_path(&self) -> PathBuf {
        PathBuf::from(&self.store_dir).join(&self.chunks_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file logs: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    8_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}
