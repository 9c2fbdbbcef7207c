//! Hosted embedding backend for the OpenAI embeddings API.
//!
//! Only compiled with the `openai` feature. A retrieval call embeds exactly
//! one query string, so this client speaks the single-input form of the
//! `/v1/embeddings` endpoint and leaves batch ingestion to the sequential
//! default of [`EmbeddingClient::embed_batch`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::embedding::EmbeddingClient;
use crate::error::{Result, RetrievalError};

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_DIMENSIONS: usize = 1536;

/// An [`EmbeddingClient`] backed by the OpenAI embeddings API.
///
/// The client is pinned to one model and one output width. Responses whose
/// width differs from the configured one are rejected: a query vector of
/// the wrong width would be skipped against every embedded corpus chunk and
/// silently return nothing.
///
/// # Example
///
/// ```rust,ignore
/// use shopfloor_rag::openai::OpenAIEmbeddingClient;
///
/// let client = OpenAIEmbeddingClient::from_env()?;
/// let vector = client.embed("conveyor belt misalignment").await?;
/// ```
pub struct OpenAIEmbeddingClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAIEmbeddingClient {
    /// Create a new client with the given API key, using the default model
    /// (`text-embedding-3-small`, 1536 dimensions).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(embedding_error("API key must not be empty"));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new client using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| embedding_error("OPENAI_API_KEY environment variable not set"))?;
        Self::new(api_key)
    }

    /// Use a different embedding model, stating the width it produces.
    ///
    /// The width must match the one the corpus was embedded with.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

fn embedding_error(message: impl Into<String>) -> RetrievalError {
    RetrievalError::Embedding { provider: "OpenAI".into(), message: message.into() }
}

#[derive(Deserialize)]
struct ApiResponse {
    data: Vec<ApiEmbedding>,
}

#[derive(Deserialize)]
struct ApiEmbedding {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingClient for OpenAIEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.model, text_len = text.len(), "requesting query embedding");

        let response = self
            .http
            .post(EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({ "model": self.model, "input": text }))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embeddings request failed");
                embedding_error(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "embeddings API error");
            return Err(embedding_error(format!("API returned {status}: {body}")));
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to decode embeddings response");
            embedding_error(format!("failed to decode response: {e}"))
        })?;

        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| embedding_error("API response contained no embedding"))?;

        if vector.len() != self.dimensions {
            return Err(embedding_error(format!(
                "expected {} dimensions, API returned {}",
                self.dimensions,
                vector.len()
            )));
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = OpenAIEmbeddingClient::new("").err();
        assert!(matches!(err, Some(RetrievalError::Embedding { .. })));
    }

    #[test]
    fn defaults_match_the_small_embedding_model() {
        let client = OpenAIEmbeddingClient::new("sk-test").unwrap();
        assert_eq!(client.model, DEFAULT_MODEL);
        assert_eq!(client.dimensions(), DEFAULT_DIMENSIONS);
    }

    #[test]
    fn with_model_updates_width_together_with_name() {
        let client = OpenAIEmbeddingClient::new("sk-test")
            .unwrap()
            .with_model("text-embedding-3-large", 3072);
        assert_eq!(client.model, "text-embedding-3-large");
        assert_eq!(client.dimensions(), 3072);
    }

    #[test]
    fn response_decoding_takes_the_first_embedding() {
        let parsed: ApiResponse =
            serde_json::from_str(r#"{"data":[{"embedding":[0.25,-0.5]},{"embedding":[1.0]}]}"#)
                .unwrap();
        let vector = parsed.data.into_iter().next().map(|d| d.embedding).unwrap();
        assert_eq!(vector, vec![0.25, -0.5]);
    }
}
