pub mod answer;
pub mod build;
pub mod chunking;
pub mod config;
pub mod retrieval;

pub use answer::{Answer, QueryOutcome};
pub use build::BuildReport;
pub use chunking::{Chunk, ChunkingConfig, Document, Page};
pub use config::{
    Config, EmbeddingConfig, GenerationConfig, LoggingConfig, RetrievalConfig, RetryConfig,
    StorageConfig,
};
pub use retrieval::{QueryOptions, RetrievalResult};
