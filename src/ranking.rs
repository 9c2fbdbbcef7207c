//! Chunk ranking: cosine-similarity scoring and the keyword fallback.
//!
//! Both rankers are pure functions over a corpus snapshot. They share the
//! same shape: score every chunk, drop the ineligible ones, stable-sort
//! descending, truncate to `top_k`. Ties keep corpus iteration order.

use std::collections::BTreeSet;

use tracing::debug;

use crate::document::{Chunk, RankedChunk};

/// Compute cosine similarity between two vectors.
///
/// `dot(a, b) / (‖a‖ · ‖b‖)`, with the convention that the result is 0.0
/// whenever either vector has zero magnitude. Vectors of differing length
/// are scored over their common prefix; callers filter those out first.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Rank chunks by cosine similarity against a query embedding.
///
/// Chunks without an embedding, with an embedding of mismatched
/// dimensionality, or with empty text are skipped rather than failing the
/// whole pass. Results with `similarity < similarity_threshold` are
/// filtered out, the rest are sorted non-increasing by similarity (stable,
/// so equal scores keep corpus order) and truncated to `top_k`.
pub fn rank_by_embedding(
    query_embedding: &[f32],
    chunks: &[Chunk],
    top_k: usize,
    similarity_threshold: f32,
) -> Vec<RankedChunk> {
    let mut ranked: Vec<RankedChunk> = chunks
        .iter()
        .filter_map(|chunk| {
            if chunk.text.is_empty() {
                debug!(source = %chunk.source, "skipping chunk with empty text");
                return None;
            }
            let embedding = chunk.embedding.as_deref()?;
            if embedding.len() != query_embedding.len() {
                debug!(
                    source = %chunk.source,
                    chunk_dims = embedding.len(),
                    query_dims = query_embedding.len(),
                    "skipping chunk with mismatched embedding dimensionality"
                );
                return None;
            }
            let similarity = cosine_similarity(query_embedding, embedding);
            (similarity >= similarity_threshold).then(|| RankedChunk {
                text: chunk.text.clone(),
                source: chunk.source.clone(),
                similarity,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_k);
    ranked
}

/// Rank chunks by lexical keyword overlap.
///
/// The query is whitespace-tokenized into a set of lowercase keywords, so a
/// repeated query word counts once. Each chunk scores the sum of
/// non-overlapping literal substring occurrences of every keyword in its
/// lowercased text, normalized by the keyword count so query length does
/// not bias absolute scores. Chunks with no match at all are
/// dropped; there is no threshold filter on this path. Matching is
/// deliberately unanchored ("oil" also counts inside "foil") to keep the
/// fallback's recall loose.
pub fn rank_by_keywords(query: &str, chunks: &[Chunk], top_k: usize) -> Vec<RankedChunk> {
    let keywords: BTreeSet<String> =
        query.split_whitespace().map(|w| w.to_lowercase()).collect();
    if keywords.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedChunk> = chunks
        .iter()
        .filter_map(|chunk| {
            if chunk.text.is_empty() {
                debug!(source = %chunk.source, "skipping chunk with empty text");
                return None;
            }
            let haystack = chunk.text.to_lowercase();
            let raw_score: usize =
                keywords.iter().map(|kw| haystack.match_indices(kw.as_str()).count()).sum();
            (raw_score > 0).then(|| RankedChunk {
                text: chunk.text.clone(),
                source: chunk.source.clone(),
                similarity: raw_score as f32 / keywords.len() as f32,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_k);
    ranked
}
