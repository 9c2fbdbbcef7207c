//! Retrieval orchestrator.
//!
//! The [`Retriever`] hides the choice between semantic and keyword ranking
//! behind a single entry point: embed the query, load a corpus snapshot,
//! then rank with cosine similarity if a query vector was obtained or fall
//! back to keyword overlap if not.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfloor_rag::{Retriever, RetrievalConfig, InMemoryCorpusStore};
//!
//! let retriever = Retriever::builder()
//!     .config(RetrievalConfig::default())
//!     .embedding_client(Arc::new(my_client))
//!     .corpus_store(Arc::new(InMemoryCorpusStore::new()))
//!     .build()?;
//!
//! let chunks = retriever.find_relevant_chunks("hydraulic filter clogged").await?;
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RetrievalConfig;
use crate::corpus::CorpusStore;
use crate::document::RankedChunk;
use crate::embedding::{EmbeddingClient, QueryEmbedding};
use crate::error::{Result, RetrievalError};
use crate::ranking::{rank_by_embedding, rank_by_keywords};

/// The retrieval orchestrator.
///
/// Stateless and re-entrant: every call loads its own corpus snapshot and
/// holds no shared mutable state, so concurrent queries need no
/// coordination. Construct one via [`Retriever::builder()`].
pub struct Retriever {
    config: RetrievalConfig,
    embedding_client: Arc<dyn EmbeddingClient>,
    corpus_store: Arc<dyn CorpusStore>,
}

impl Retriever {
    /// Create a new [`RetrieverBuilder`].
    pub fn builder() -> RetrieverBuilder {
        RetrieverBuilder::default()
    }

    /// Return a reference to the retrieval configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Return a reference to the embedding client.
    pub fn embedding_client(&self) -> &Arc<dyn EmbeddingClient> {
        &self.embedding_client
    }

    /// Return a reference to the corpus store.
    pub fn corpus_store(&self) -> &Arc<dyn CorpusStore> {
        &self.corpus_store
    }

    /// Find the chunks most relevant to `query`, using the configured
    /// `top_k` and `similarity_threshold`.
    ///
    /// Attempts to embed the query first. If the embedding backend yields a
    /// vector, chunks are ranked by cosine similarity and filtered by the
    /// threshold; if it fails or returns nothing, the query degrades to
    /// keyword ranking for this one call — there is no retry. An empty
    /// result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::CorpusStore`] if the corpus snapshot cannot
    /// be loaded. Embedding failures never surface here.
    pub async fn find_relevant_chunks(&self, query: &str) -> Result<Vec<RankedChunk>> {
        self.find_relevant_chunks_with(query, self.config.top_k, self.config.similarity_threshold)
            .await
    }

    /// Find relevant chunks with per-call `top_k` and `similarity_threshold`
    /// overrides, bypassing the configured values.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if the overrides are out of range,
    /// or [`RetrievalError::CorpusStore`] if the corpus cannot be loaded.
    pub async fn find_relevant_chunks_with(
        &self,
        query: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<RankedChunk>> {
        if top_k == 0 {
            return Err(RetrievalError::Config("top_k must be greater than zero".to_string()));
        }
        if !(0.0..=1.0).contains(&similarity_threshold) {
            return Err(RetrievalError::Config(format!(
                "similarity_threshold ({similarity_threshold}) must be within [0, 1]"
            )));
        }

        // 1. Attempt the query embedding. Failures select the fallback path.
        let query_embedding = self.embed_query(query).await;

        // 2. Load a fresh corpus snapshot. Needed by either ranking path;
        //    load failure is the one hard error of a retrieval call.
        let chunks = self.corpus_store.load_all().await?;
        debug!(chunk_count = chunks.len(), "loaded corpus snapshot");

        // 3. Rank.
        let results = match query_embedding {
            QueryEmbedding::Embedded(vector) => {
                rank_by_embedding(&vector, &chunks, top_k, similarity_threshold)
            }
            QueryEmbedding::Unavailable => rank_by_keywords(query, &chunks, top_k),
        };

        info!(result_count = results.len(), "retrieval completed");
        Ok(results)
    }

    /// Embed the query, mapping any backend failure to
    /// [`QueryEmbedding::Unavailable`].
    async fn embed_query(&self, query: &str) -> QueryEmbedding {
        match self.embedding_client.embed(query).await {
            Ok(vector) if !vector.is_empty() => QueryEmbedding::Embedded(vector),
            Ok(_) => {
                warn!("embedding backend returned an empty vector, falling back to keyword ranking");
                QueryEmbedding::Unavailable
            }
            Err(e) => {
                warn!(error = %e, "query embedding failed, falling back to keyword ranking");
                QueryEmbedding::Unavailable
            }
        }
    }
}

/// Builder for constructing a [`Retriever`].
///
/// The embedding client and corpus store are required; the configuration
/// defaults to [`RetrievalConfig::default()`] when not set.
#[derive(Default)]
pub struct RetrieverBuilder {
    config: Option<RetrievalConfig>,
    embedding_client: Option<Arc<dyn EmbeddingClient>>,
    corpus_store: Option<Arc<dyn CorpusStore>>,
}

impl RetrieverBuilder {
    /// Set the retrieval configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding client.
    pub fn embedding_client(mut self, client: Arc<dyn EmbeddingClient>) -> Self {
        self.embedding_client = Some(client);
        self
    }

    /// Set the corpus store backend.
    pub fn corpus_store(mut self, store: Arc<dyn CorpusStore>) -> Self {
        self.corpus_store = Some(store);
        self
    }

    /// Build the [`Retriever`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if a required field is missing.
    pub fn build(self) -> Result<Retriever> {
        let embedding_client = self
            .embedding_client
            .ok_or_else(|| RetrievalError::Config("embedding_client is required".to_string()))?;
        let corpus_store = self
            .corpus_store
            .ok_or_else(|| RetrievalError::Config("corpus_store is required".to_string()))?;

        Ok(Retriever {
            config: self.config.unwrap_or_default(),
            embedding_client,
            corpus_store,
        })
    }
}
