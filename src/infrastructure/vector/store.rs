//! Persisted vector store
//!
//! Two files make up a store:
//! - the index file, bincode-encoded with a magic header, format version,
//!   store id and dimension ahead of the raw vectors;
//! - the chunk store, JSON with the same store id plus document metadata.
//!
//! Both are written to a `.tmp` sibling, synced and renamed into place, so a
//! reader sees either the previous file or the new one. A pair written by
//! different builds is detected through the shared store id.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::index::{FlatIndex, IndexError};
use crate::domain::errors::RagError;
use crate::domain::models::Chunk;

/// Leading bytes of every index file
pub const INDEX_MAGIC: [u8; 8] = *b"SRAGIDX1";

/// Current index file format version
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Current chunk store format version
pub const CHUNK_STORE_FORMAT_VERSION: u32 = 1;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode index: {0}")]
    Encode(String),

    #[error("Corrupt store file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Store files do not belong together: {0}. Rebuild the store.")]
    Mismatch(String),

    #[error("Invalid index contents: {0}")]
    Index(#[from] IndexError),
}

impl From<StoreError> for RagError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(path) => Self::MissingStore { path },
            StoreError::Io { .. } | StoreError::Encode(_) => Self::Storage(err.to_string()),
            StoreError::Corrupt { .. } | StoreError::Mismatch(_) | StoreError::Index(_) => {
                Self::SearchFailure(err.to_string())
            }
        }
    }
}

/// Scalar metadata describing a built store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Identifier shared by the index and chunk files of one build
    pub store_id: Uuid,

    /// When the store was built
    pub built_at: DateTime<Utc>,

    /// Source document file name
    pub source_document: String,

    /// Page count of the source document
    pub total_pages: usize,

    /// Embedding model the vectors came from
    pub embedding_model: String,

    /// Vector dimension
    pub dimension: usize,
}

impl StoreMetadata {
    /// Fresh metadata for a new build
    pub fn new(
        source_document: impl Into<String>,
        total_pages: usize,
        embedding_model: impl Into<String>,
        dimension: usize,
    ) -> Self {
        Self {
            store_id: Uuid::new_v4(),
            built_at: Utc::now(),
            source_document: source_document.into(),
            total_pages,
            embedding_model: embedding_model.into(),
            dimension,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct IndexFile {
    magic: [u8; 8],
    format_version: u32,
    store_id: Uuid,
    dimension: u64,
    vectors: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct ChunkStoreFile {
    format_version: u32,
    #[serde(flatten)]
    metadata: StoreMetadata,
    chunks: Vec<Chunk>,
}

/// Index plus the chunks it points at, joined by ordinal
#[derive(Debug, Clone)]
pub struct VectorStore {
    index: FlatIndex,
    chunks: Vec<Chunk>,
    metadata: StoreMetadata,
}

impl VectorStore {
    /// Assemble a store, checking that index and chunks line up
    pub fn new(
        index: FlatIndex,
        chunks: Vec<Chunk>,
        metadata: StoreMetadata,
    ) -> Result<Self, StoreError> {
        if index.len() != chunks.len() {
            return Err(StoreError::Mismatch(format!(
                "index holds {} vectors but there are {} chunks",
                index.len(),
                chunks.len()
            )));
        }
        if index.dimension() != metadata.dimension {
            return Err(StoreError::Mismatch(format!(
                "index dimension {} differs from recorded dimension {}",
                index.dimension(),
                metadata.dimension
            )));
        }
        if let Some((ordinal, chunk)) = chunks
            .iter()
            .enumerate()
            .find(|(ordinal, chunk)| chunk.chunk_index != *ordinal)
        {
            return Err(StoreError::Mismatch(format!(
                "chunk at position {ordinal} has chunk_index {}",
                chunk.chunk_index
            )));
        }

        Ok(Self {
            index,
            chunks,
            metadata,
        })
    }

    /// The similarity index
    pub const fn index(&self) -> &FlatIndex {
        &self.index
    }

    /// All chunks in ordinal order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk at `ordinal`, if any
    pub fn chunk(&self, ordinal: usize) -> Option<&Chunk> {
        self.chunks.get(ordinal)
    }

    /// Store metadata
    pub const fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    /// Number of chunks (and vectors)
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true for a store with no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Persist both files, replacing any previous store.
    ///
    /// The index is renamed into place before the chunk store.
    pub async fn save(&self, index_path: &Path, chunks_path: &Path) -> Result<(), StoreError> {
        let index_file = IndexFile {
            magic: INDEX_MAGIC,
            format_version: INDEX_FORMAT_VERSION,
            store_id: self.metadata.store_id,
            dimension: self.index.dimension() as u64,
            vectors: self.index.as_raw().to_vec(),
        };
        let index_bytes =
            bincode::serialize(&index_file).map_err(|e| StoreError::Encode(e.to_string()))?;

        let chunk_file = ChunkStoreFile {
            format_version: CHUNK_STORE_FORMAT_VERSION,
            metadata: self.metadata.clone(),
            chunks: self.chunks.clone(),
        };
        let chunk_bytes =
            serde_json::to_vec_pretty(&chunk_file).map_err(|e| StoreError::Encode(e.to_string()))?;

        write_atomic(index_path, &index_bytes).await?;
        write_atomic(chunks_path, &chunk_bytes).await?;

        tracing::info!(
            store_id = %self.metadata.store_id,
            vectors = self.index.len(),
            index = %index_path.display(),
            chunks = %chunks_path.display(),
            "vector store saved"
        );

        Ok(())
    }

    /// Load and cross-check a previously saved store
    pub async fn load(index_path: &Path, chunks_path: &Path) -> Result<Self, StoreError> {
        let index_bytes = read_file(index_path).await?;
        let chunk_bytes = read_file(chunks_path).await?;

        if !index_bytes.starts_with(&INDEX_MAGIC) {
            return Err(StoreError::Corrupt {
                path: index_path.to_path_buf(),
                reason: "missing index header".to_string(),
            });
        }
        let index_file: IndexFile =
            bincode::deserialize(&index_bytes).map_err(|e| StoreError::Corrupt {
                path: index_path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if index_file.format_version != INDEX_FORMAT_VERSION {
            return Err(StoreError::Corrupt {
                path: index_path.to_path_buf(),
                reason: format!(
                    "unsupported index format version {}",
                    index_file.format_version
                ),
            });
        }

        let chunk_file: ChunkStoreFile =
            serde_json::from_slice(&chunk_bytes).map_err(|e| StoreError::Corrupt {
                path: chunks_path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if chunk_file.format_version != CHUNK_STORE_FORMAT_VERSION {
            return Err(StoreError::Corrupt {
                path: chunks_path.to_path_buf(),
                reason: format!(
                    "unsupported chunk store format version {}",
                    chunk_file.format_version
                ),
            });
        }

        if index_file.store_id != chunk_file.metadata.store_id {
            return Err(StoreError::Mismatch(format!(
                "index store id {} differs from chunk store id {}",
                index_file.store_id, chunk_file.metadata.store_id
            )));
        }

        let dimension = usize::try_from(index_file.dimension).map_err(|_| StoreError::Corrupt {
            path: index_path.to_path_buf(),
            reason: format!("dimension {} out of range", index_file.dimension),
        })?;
        let index = FlatIndex::from_raw(dimension, index_file.vectors)?;
        let store = Self::new(index, chunk_file.chunks, chunk_file.metadata)?;

        tracing::debug!(
            store_id = %store.metadata.store_id,
            chunks = store.len(),
            total_pages = store.metadata.total_pages,
            "vector store loaded"
        );

        Ok(store)
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, StoreError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::Missing(path.to_path_buf()))
        }
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut file = fs::File::create(&tmp_path).await.map_err(io_err)?;
    file.write_all(bytes).await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    drop(file);

    fs::rename(&tmp_path, path).await.map_err(io_err)
}
