//! Embedding client trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A client that turns text into embedding vectors.
///
/// The retriever embeds exactly one query string per call; ingestion embeds
/// whole documents of chunks through
/// [`embed_batch`](EmbeddingClient::embed_batch). All vectors from one
/// client must share the width reported by
/// [`dimensions`](EmbeddingClient::dimensions) — the rankers skip corpus
/// chunks whose width differs from the query's.
///
/// # Example
///
/// ```rust,ignore
/// use shopfloor_rag::EmbeddingClient;
///
/// let client = MyEmbeddingClient::new();
/// let embedding = client.embed("hydraulic pressure drop").await?;
/// assert_eq!(embedding.len(), client.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, one vector per input, in input order.
    ///
    /// The default loops over [`embed`](EmbeddingClient::embed); a backend
    /// with a native batch endpoint can override this for throughput.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this client.
    fn dimensions(&self) -> usize;
}

/// Outcome of the query-embedding step of a retrieval call.
///
/// Embedding failures (network, auth, quota, parse) are not errors for the
/// retrieval as a whole: they select the keyword fallback path. Making the
/// outcome a two-variant type keeps that branch visible in signatures
/// instead of hiding it behind a caught error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEmbedding {
    /// The embedding backend returned a vector for the query.
    Embedded(Vec<f32>),
    /// No vector could be obtained; rank by keywords instead.
    Unavailable,
}
