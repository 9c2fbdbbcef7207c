//! # shopfloor-rag
//!
//! Reference-material retrieval for equipment-troubleshooting assistants.
//!
//! Given a free-text question from a technician, the [`Retriever`] finds
//! the most relevant chunks of ingested manuals and emergency-flow
//! documents: it embeds the query, ranks corpus chunks by cosine
//! similarity, and degrades to keyword matching whenever the embedding
//! backend is unavailable — one query never fails because the hosted model
//! is down.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfloor_rag::{
//!     FixedSizeChunker, Chunker, InMemoryCorpusStore, RetrievalConfig, Retriever,
//! };
//!
//! let store = Arc::new(InMemoryCorpusStore::new());
//! let chunker = FixedSizeChunker::new(512, 100)?;
//! store.add_document("pump-manual", chunker.chunk("pump-manual", &text)).await;
//!
//! let retriever = Retriever::builder()
//!     .config(RetrievalConfig::builder().top_k(5).similarity_threshold(0.5).build()?)
//!     .embedding_client(embedding_client)
//!     .corpus_store(store)
//!     .build()?;
//!
//! let chunks = retriever.find_relevant_chunks("hydraulic filter clogged").await?;
//! ```

pub mod chunking;
pub mod config;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
#[cfg(feature = "openai")]
pub mod openai;
pub mod ranking;
pub mod retriever;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use corpus::{CorpusStore, InMemoryCorpusStore};
pub use document::{Chunk, RankedChunk};
pub use embedding::{EmbeddingClient, QueryEmbedding};
pub use error::{Result, RetrievalError};
pub use ranking::{cosine_similarity, rank_by_embedding, rank_by_keywords};
pub use retriever::{Retriever, RetrieverBuilder};

#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingClient;
