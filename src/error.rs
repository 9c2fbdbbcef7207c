//! Error types for the `shopfloor-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// An error occurred during embedding generation.
    ///
    /// The [`Retriever`](crate::Retriever) never propagates this variant to
    /// its callers; it degrades the query to keyword ranking instead.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while loading the corpus from its backing store.
    ///
    /// This is the one failure that propagates out of a retrieval call:
    /// without a corpus neither ranking strategy can produce a result.
    #[error("Corpus store error ({backend}): {message}")]
    CorpusStore {
        /// The corpus backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
