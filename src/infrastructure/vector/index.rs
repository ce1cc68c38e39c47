//! Exact inner-product index over L2-normalized vectors
//!
//! Vectors are stored row-major in one contiguous buffer; the ordinal of a
//! vector is its insertion position. With unit-length vectors the inner
//! product equals cosine similarity.

use std::cmp::Ordering;

use thiserror::Error;

/// Errors raised by [`FlatIndex`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Vector contains non-finite values")]
    NonFinite,

    #[error("Index dimension must be greater than 0")]
    ZeroDimension,

    #[error("Raw buffer of {len} floats is not a multiple of dimension {dimension}")]
    RaggedBuffer { len: usize, dimension: usize },
}

/// One search match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Inner product with the query
    pub score: f32,
    /// Insertion position of the matched vector
    pub ordinal: usize,
}

/// Scale `vector` to unit length in place. Zero vectors are left as they are.
pub fn normalize_l2(vector: &mut [f32]) {
    let norm = vector
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt();

    if norm > f64::EPSILON {
        for value in vector.iter_mut() {
            *value = (f64::from(*value) / norm) as f32;
        }
    }
}

/// Flat (brute-force) similarity index
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index
    pub fn new(dimension: usize) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::ZeroDimension);
        }
        Ok(Self {
            dimension,
            data: Vec::new(),
        })
    }

    /// Build an index from vectors in order; each is normalized on insert
    pub fn build(dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        let mut index = Self::new(dimension)?;
        index.data.reserve(vectors.len() * dimension);
        for vector in vectors {
            index.add(vector)?;
        }
        Ok(index)
    }

    /// Restore an index from an already-normalized row-major buffer
    pub fn from_raw(dimension: usize, data: Vec<f32>) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::ZeroDimension);
        }
        if data.len() % dimension != 0 {
            return Err(IndexError::RaggedBuffer {
                len: data.len(),
                dimension,
            });
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(IndexError::NonFinite);
        }
        Ok(Self { dimension, data })
    }

    /// Normalize and append a vector, returning its ordinal
    pub fn add(&mut self, mut vector: Vec<f32>) -> Result<usize, IndexError> {
        self.check_vector(&vector)?;
        normalize_l2(&mut vector);
        let ordinal = self.len();
        self.data.extend_from_slice(&vector);
        Ok(ordinal)
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Returns true when no vectors are stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector dimension
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Stored (normalized) vector at `ordinal`
    pub fn vector(&self, ordinal: usize) -> Option<&[f32]> {
        let start = ordinal.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    /// Row-major view of every stored vector
    pub fn as_raw(&self) -> &[f32] {
        &self.data
    }

    /// Return up to `k` best matches by inner product.
    ///
    /// Results are ordered by descending score; equal scores are ordered by
    /// ascending ordinal. When `k` exceeds the stored count every vector is
    /// returned once.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, IndexError> {
        self.check_vector(query)?;

        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(ordinal, row)| SearchHit {
                score: dot(row, query),
                ordinal,
            })
            .collect();

        hits.sort_unstable_by(rank);
        hits.truncate(k);
        Ok(hits)
    }

    fn check_vector(&self, vector: &[f32]) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(IndexError::NonFinite);
        }
        Ok(())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn rank(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}
