//! Corpus store trait and an in-memory implementation.
//!
//! A corpus store holds the chunk records produced by ingestion and hands
//! the rankers a fresh snapshot on every query. No persistent index is
//! maintained between calls.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::Chunk;
use crate::error::Result;

/// A backing store for corpus chunks.
///
/// Implementations own the grouping of chunks by source document; ranking
/// consumes the snapshot as one flat sequence. Load failures are hard
/// errors — without a corpus neither ranking strategy can run.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Load a snapshot of every chunk in the corpus.
    ///
    /// The returned order must be deterministic across calls while the
    /// corpus is unchanged; ranking relies on it as the tie-break order
    /// for equal scores.
    async fn load_all(&self) -> Result<Vec<Chunk>>;
}

/// An in-memory corpus store with chunks grouped by source document.
///
/// Documents are kept in a `BTreeMap` behind a `tokio::sync::RwLock`, so
/// [`load_all`](CorpusStore::load_all) yields chunks in source order and
/// then insertion order within each source. Suitable for development,
/// testing, and corpora small enough to hold resident.
///
/// # Example
///
/// ```rust,ignore
/// use shopfloor_rag::InMemoryCorpusStore;
///
/// let store = InMemoryCorpusStore::new();
/// store.add_document("pump-manual", chunks).await;
/// store.remove_document("pump-manual").await;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCorpusStore {
    documents: RwLock<BTreeMap<String, Vec<Chunk>>>,
}

impl InMemoryCorpusStore {
    /// Create a new empty in-memory corpus store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a document's chunks under the given source id.
    pub async fn add_document(&self, source: impl Into<String>, chunks: Vec<Chunk>) {
        let mut documents = self.documents.write().await;
        documents.insert(source.into(), chunks);
    }

    /// Remove a document and all of its chunks.
    ///
    /// Chunks are logically deleted together with their backing document;
    /// subsequent queries will not see them.
    pub async fn remove_document(&self, source: &str) {
        let mut documents = self.documents.write().await;
        documents.remove(source);
    }

    /// Number of documents currently held.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl CorpusStore for InMemoryCorpusStore {
    async fn load_all(&self) -> Result<Vec<Chunk>> {
        let documents = self.documents.read().await;
        Ok(documents.values().flatten().cloned().collect())
    }
}
