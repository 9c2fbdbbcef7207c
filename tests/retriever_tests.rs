//! Orchestrator tests with fake embedding and corpus collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use shopfloor_rag::corpus::{CorpusStore, InMemoryCorpusStore};
use shopfloor_rag::document::Chunk;
use shopfloor_rag::embedding::EmbeddingClient;
use shopfloor_rag::error::{Result, RetrievalError};
use shopfloor_rag::ranking::rank_by_keywords;
use shopfloor_rag::{RetrievalConfig, Retriever};

const TOLERANCE: f32 = 1e-6;

/// An embedding client that always returns the same vector.
struct FixedEmbeddingClient {
    vector: Vec<f32>,
}

#[async_trait]
impl EmbeddingClient for FixedEmbeddingClient {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// An embedding client that always fails, as an unreachable backend would.
struct FailingEmbeddingClient;

#[async_trait]
impl EmbeddingClient for FailingEmbeddingClient {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RetrievalError::Embedding {
            provider: "fake".into(),
            message: "connection refused".into(),
        })
    }

    fn dimensions(&self) -> usize {
        2
    }
}

/// A corpus store whose backing storage is unreachable.
struct FailingCorpusStore;

#[async_trait]
impl CorpusStore for FailingCorpusStore {
    async fn load_all(&self) -> Result<Vec<Chunk>> {
        Err(RetrievalError::CorpusStore {
            backend: "fake".into(),
            message: "storage backend unreachable".into(),
        })
    }
}

fn retriever(
    client: Arc<dyn EmbeddingClient>,
    store: Arc<dyn CorpusStore>,
    config: RetrievalConfig,
) -> Retriever {
    Retriever::builder()
        .config(config)
        .embedding_client(client)
        .corpus_store(store)
        .build()
        .unwrap()
}

async fn store_with(chunks: Vec<(&str, Chunk)>) -> Arc<InMemoryCorpusStore> {
    let store = Arc::new(InMemoryCorpusStore::new());
    for (source, chunk) in chunks {
        store.add_document(source, vec![chunk]).await;
    }
    store
}

#[tokio::test]
async fn semantic_path_returns_matching_chunk() {
    let store = store_with(vec![(
        "manual_1",
        Chunk::with_embedding("replace the hydraulic filter", "manual_1", vec![1.0, 0.0]),
    )])
    .await;
    let client = Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] });

    let r = retriever(client, store, RetrievalConfig::default());
    let results = r.find_relevant_chunks("hydraulic filter").await.unwrap();

    assert_eq!(results.len(), 1);
    assert!((results[0].similarity - 1.0).abs() < TOLERANCE);
}

#[tokio::test]
async fn semantic_path_filters_below_threshold() {
    let store = store_with(vec![(
        "manual_1",
        Chunk::with_embedding("replace the hydraulic filter", "manual_1", vec![1.0, 0.0]),
    )])
    .await;
    // Orthogonal query vector: similarity ≈ 0, below the 0.5 default.
    let client = Arc::new(FixedEmbeddingClient { vector: vec![0.0, 1.0] });

    let r = retriever(client, store, RetrievalConfig::default());
    let results = r.find_relevant_chunks("unrelated question").await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn embedding_failure_falls_back_to_keyword_ranking() {
    let chunk = Chunk::new("replace the hydraulic filter", "manual_1");
    let store = store_with(vec![("manual_1", chunk.clone())]).await;

    let r = retriever(Arc::new(FailingEmbeddingClient), store.clone(), RetrievalConfig::default());
    let results = r.find_relevant_chunks("hydraulic filter").await.unwrap();

    // The degraded result must match a direct keyword ranking of the same
    // corpus snapshot and query.
    let snapshot = store.load_all().await.unwrap();
    let expected = rank_by_keywords("hydraulic filter", &snapshot, 5);

    assert_eq!(results.len(), expected.len());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, expected[0].text);
    assert!((results[0].similarity - 1.0).abs() < TOLERANCE);
}

#[tokio::test]
async fn empty_embedding_vector_also_falls_back() {
    let store = store_with(vec![("manual_1", Chunk::new("check the drive belt", "manual_1"))]).await;
    let client = Arc::new(FixedEmbeddingClient { vector: Vec::new() });

    let r = retriever(client, store, RetrievalConfig::default());
    let results = r.find_relevant_chunks("drive belt").await.unwrap();

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn successful_embedding_never_uses_keyword_path() {
    // The chunk text matches the query lexically but carries no embedding,
    // so the semantic path must skip it entirely.
    let store = store_with(vec![("manual_1", Chunk::new("hydraulic filter", "manual_1"))]).await;
    let client = Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] });

    let r = retriever(client, store, RetrievalConfig::default());
    let results = r.find_relevant_chunks("hydraulic filter").await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn empty_corpus_is_not_an_error() {
    let store = Arc::new(InMemoryCorpusStore::new());
    let r = retriever(
        Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] }),
        store,
        RetrievalConfig::default(),
    );

    let results = r.find_relevant_chunks("anything").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn corpus_load_failure_propagates() {
    let r = retriever(
        Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] }),
        Arc::new(FailingCorpusStore),
        RetrievalConfig::default(),
    );

    let err = r.find_relevant_chunks("anything").await.unwrap_err();
    assert!(matches!(err, RetrievalError::CorpusStore { .. }));
}

#[tokio::test]
async fn corpus_load_failure_propagates_even_on_fallback_path() {
    let r = retriever(
        Arc::new(FailingEmbeddingClient),
        Arc::new(FailingCorpusStore),
        RetrievalConfig::default(),
    );

    let err = r.find_relevant_chunks("anything").await.unwrap_err();
    assert!(matches!(err, RetrievalError::CorpusStore { .. }));
}

#[tokio::test]
async fn per_call_override_bypasses_configured_values() {
    let store = Arc::new(InMemoryCorpusStore::new());
    let chunks: Vec<Chunk> = (0..5)
        .map(|i| {
            let x = 0.6 + 0.08 * i as f32;
            let y = (1.0 - x * x).sqrt();
            Chunk::with_embedding(format!("chunk {i}"), "manual_1", vec![x, y])
        })
        .collect();
    store.add_document("manual_1", chunks).await;

    let r = retriever(
        Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] }),
        store,
        RetrievalConfig::default(),
    );

    let results = r.find_relevant_chunks_with("query", 2, 0.0).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].similarity >= results[1].similarity);
}

#[tokio::test]
async fn per_call_override_rejects_invalid_parameters() {
    let store = Arc::new(InMemoryCorpusStore::new());
    let r = retriever(
        Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] }),
        store,
        RetrievalConfig::default(),
    );

    assert!(matches!(
        r.find_relevant_chunks_with("q", 0, 0.5).await.unwrap_err(),
        RetrievalError::Config(_)
    ));
    assert!(matches!(
        r.find_relevant_chunks_with("q", 5, 1.5).await.unwrap_err(),
        RetrievalError::Config(_)
    ));
}

#[tokio::test]
async fn removed_document_is_no_longer_retrievable() {
    let store = Arc::new(InMemoryCorpusStore::new());
    store
        .add_document(
            "manual_1",
            vec![Chunk::with_embedding("hydraulic filter", "manual_1", vec![1.0, 0.0])],
        )
        .await;

    let r = retriever(
        Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] }),
        store.clone(),
        RetrievalConfig::default(),
    );

    assert_eq!(r.find_relevant_chunks("hydraulic filter").await.unwrap().len(), 1);

    store.remove_document("manual_1").await;
    assert!(r.find_relevant_chunks("hydraulic filter").await.unwrap().is_empty());
}

#[tokio::test]
async fn results_serialize_for_the_route_layer() {
    let store = store_with(vec![(
        "manual_1",
        Chunk::with_embedding("replace the hydraulic filter", "manual_1", vec![1.0, 0.0]),
    )])
    .await;
    let client = Arc::new(FixedEmbeddingClient { vector: vec![1.0, 0.0] });

    let r = retriever(client, store, RetrievalConfig::default());
    let results = r.find_relevant_chunks("hydraulic filter").await.unwrap();

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["source"], "manual_1");
    assert_eq!(json[0]["text"], "replace the hydraulic filter");
}

#[test]
fn builder_requires_collaborators() {
    let missing_client = Retriever::builder()
        .corpus_store(Arc::new(InMemoryCorpusStore::new()))
        .build();
    assert!(matches!(missing_client.err(), Some(RetrievalError::Config(_))));

    let missing_store = Retriever::builder()
        .embedding_client(Arc::new(FixedEmbeddingClient { vector: vec![1.0] }))
        .build();
    assert!(matches!(missing_store.err(), Some(RetrievalError::Config(_))));
}

#[test]
fn config_builder_validates_ranges() {
    assert!(RetrievalConfig::builder().top_k(0).build().is_err());
    assert!(RetrievalConfig::builder().similarity_threshold(-0.1).build().is_err());
    assert!(RetrievalConfig::builder().similarity_threshold(1.1).build().is_err());

    let config = RetrievalConfig::builder().top_k(3).similarity_threshold(0.7).build().unwrap();
    assert_eq!(config.top_k, 3);
    assert!((config.similarity_threshold - 0.7).abs() < TOLERANCE);
}

#[test]
fn default_config_matches_documented_values() {
    let config = RetrievalConfig::default();
    assert_eq!(config.top_k, 5);
    assert!((config.similarity_threshold - 0.5).abs() < TOLERANCE);
}
