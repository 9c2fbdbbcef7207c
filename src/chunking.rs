//! Splitting manual text into corpus chunks.
//!
//! Ingestion runs offline, ahead of any query: uploaded reference material
//! is split here, embedded in batch, and handed to a
//! [`CorpusStore`](crate::corpus::CorpusStore).

use crate::document::Chunk;
use crate::error::{Result, RetrievalError};

/// A strategy for splitting document text into chunks.
///
/// Produced chunks carry their source id and text but no embedding;
/// embeddings are attached by a later batch-embedding pass.
pub trait Chunker: Send + Sync {
    /// Split `text` from the document identified by `source` into chunks.
    ///
    /// Returns an empty `Vec` for empty text.
    fn chunk(&self, source: &str, text: &str) -> Vec<Chunk>;
}

/// Splits text into fixed-size character windows with configurable overlap.
///
/// # Example
///
/// ```rust,ignore
/// use shopfloor_rag::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(512, 100)?;
/// let chunks = chunker.chunk("pump-manual", &manual_text);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RetrievalError::Config("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RetrievalError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, source: &str, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Windows are sized in characters, not bytes, so multi-byte text
        // never splits mid-codepoint.
        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            chunks.push(Chunk::new(window, source));
            start += step;
        }

        chunks
    }
}
