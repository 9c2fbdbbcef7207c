//! Data types for corpus chunks and ranked retrieval results.

use serde::{Deserialize, Serialize};

/// A unit of retrievable reference text.
///
/// Chunks are produced by an offline ingestion step (see
/// [`Chunker`](crate::chunking::Chunker)) and are read-only at query time.
/// A chunk without an embedding is still reachable through the keyword
/// fallback ranker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// The precomputed embedding vector, if this chunk was ever embedded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Identifier of the originating document.
    pub source: String,
}

impl Chunk {
    /// Create a chunk with no embedding attached.
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self { text: text.into(), embedding: None, source: source.into() }
    }

    /// Create a chunk with a precomputed embedding.
    pub fn with_embedding(
        text: impl Into<String>,
        source: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self { text: text.into(), embedding: Some(embedding), source: source.into() }
    }
}

/// A retrieved chunk paired with its relevance score.
///
/// Produced transiently per query; callers concatenate the `text` fields
/// into the prompt handed to the language model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedChunk {
    /// The text content of the retrieved chunk.
    pub text: String,
    /// Identifier of the originating document.
    pub source: String,
    /// The relevance score (higher is more relevant).
    pub similarity: f32,
}
