//! Citation data models.
//!
//! [`RetrievedChunk`] is the shape a retrieval backend attaches to a chat
//! message (`metadata.citations`). [`DocumentGroup`] is the derived,
//! per-document view built by [`group_by_document`](crate::group::group_by_document);
//! it only lives for the duration of one grouping call.
//!
//! Both serialize as camelCase. Deserialization also accepts snake_case keys
//! because backends disagree on casing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One retrieved passage, as produced by the retrieval backend.
///
/// Every field is optional; missing values are resolved by the accessors
/// below rather than at each call site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievedChunk {
    #[serde(alias = "chunk_id", skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
    #[serde(alias = "doc_id", skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(alias = "doc_title", skip_serializing_if = "Option::is_none")]
    pub doc_title: Option<String>,
    #[serde(alias = "node_id", skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(alias = "node_slug", skip_serializing_if = "Option::is_none")]
    pub node_slug: Option<String>,
    #[serde(alias = "knowledge_base_id", skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
    #[serde(alias = "document_url", skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    /// Blended / re-ranked relevance score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Per-signal score breakdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Multi-signal score breakdown. Only `vector` takes part in ranking; the
/// other signals (`bm25`, `rerank`, ...) are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<f64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl RetrievedChunk {
    /// Chunk in document `doc_id` with a flat `score`.
    pub fn new(doc_id: impl Into<String>, score: f64) -> Self {
        Self {
            doc_id: Some(doc_id.into()),
            score: Some(score),
            ..Self::default()
        }
    }

    pub fn with_chunk_id(mut self, chunk_id: impl Into<String>) -> Self {
        self.chunk_id = Some(chunk_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.doc_title = Some(title.into());
        self
    }

    pub fn with_node(mut self, node_id: impl Into<String>, node_slug: Option<&str>) -> Self {
        self.node_id = Some(node_id.into());
        self.node_slug = node_slug.map(str::to_string);
        self
    }

    pub fn with_vector_score(mut self, vector: f64) -> Self {
        self.scores.get_or_insert_with(ScoreBreakdown::default).vector = Some(vector);
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Score used for every relevance comparison.
    ///
    /// `scores.vector` wins over `score`; a value that is absent or not a
    /// finite number falls through to the next source, and finally to `0.0`.
    pub fn effective_score(&self) -> f64 {
        self.scores
            .as_ref()
            .and_then(|s| s.vector)
            .filter(|v| v.is_finite())
            .or_else(|| self.score.filter(|v| v.is_finite()))
            .unwrap_or(0.0)
    }

    /// Grouping key: `doc_id`, or the empty string when it is missing.
    pub fn group_key(&self) -> &str {
        self.doc_id.as_deref().unwrap_or("")
    }

    /// `doc_title` if present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.doc_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// All chunks that cite one document, ranked by relevance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGroup {
    pub doc_id: String,
    /// First non-blank title seen, else `"Документ N"` (N = creation order).
    pub doc_title: String,
    pub node_id: Option<String>,
    pub node_slug: Option<String>,
    pub knowledge_base_id: Option<String>,
    pub document_url: Option<String>,
    pub chunks: Vec<RetrievedChunk>,
    pub top_score: f64,
    pub total_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_score_wins() {
        let chunk = RetrievedChunk::new("A", 0.3).with_vector_score(0.9);
        assert!((chunk.effective_score() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_flat_score_fallback() {
        let mut chunk = RetrievedChunk::new("A", 0.3);
        chunk.scores = Some(ScoreBreakdown::default());
        assert!((chunk.effective_score() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_missing_scores_are_zero() {
        let chunk = RetrievedChunk::default();
        assert_eq!(chunk.effective_score(), 0.0);
    }

    #[test]
    fn test_non_finite_vector_falls_through() {
        let chunk = RetrievedChunk::new("A", 0.4).with_vector_score(f64::NAN);
        assert!((chunk.effective_score() - 0.4).abs() < 1e-9);

        let mut chunk = RetrievedChunk::default().with_vector_score(f64::INFINITY);
        chunk.score = Some(f64::NAN);
        assert_eq!(chunk.effective_score(), 0.0);
    }

    #[test]
    fn test_group_key_defaults_to_empty() {
        assert_eq!(RetrievedChunk::default().group_key(), "");
        assert_eq!(RetrievedChunk::new("doc-1", 0.0).group_key(), "doc-1");
    }

    #[test]
    fn test_blank_title_is_none() {
        let chunk = RetrievedChunk::new("A", 0.1).with_title("   ");
        assert_eq!(chunk.title(), None);
    }

    #[test]
    fn test_deserialize_both_casings() {
        let camel: RetrievedChunk = serde_json::from_str(
            r#"{"chunkId":"c1","docId":"d1","docTitle":"Guide","scores":{"vector":0.7,"bm25":3.1}}"#,
        )
        .unwrap();
        let snake: RetrievedChunk = serde_json::from_str(
            r#"{"chunk_id":"c1","doc_id":"d1","doc_title":"Guide","scores":{"vector":0.7,"bm25":3.1}}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.scores.as_ref().unwrap().other.len(), 1);
        assert!((camel.effective_score() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_serialize_camel_case() {
        let chunk = RetrievedChunk::new("d1", 0.5).with_chunk_id("c1");
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["docId"], "d1");
        assert_eq!(json["chunkId"], "c1");
        assert!(json.get("snippet").is_none());
    }
}
