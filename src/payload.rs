//! Extraction of citations from raw chat-message payloads.
//!
//! The backend attaches retrieval results to an assistant message as
//! `metadata.citations`. Payloads are read leniently: keys may be camelCase
//! or snake_case, numeric ids are stringified, and values of the wrong kind
//! are dropped field by field instead of rejecting the whole entry.
//!
//! Accepted top-level shapes, first match wins:
//!
//! 1. `{ "metadata": { "citations": [...] }, ... }` (a chat message)
//! 2. `{ "citations": [...] }`
//! 3. `[...]` (a bare citation array)

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use citegroup_core::models::{RetrievedChunk, ScoreBreakdown};

/// Chunks recovered from a payload.
#[derive(Debug, Clone, Default)]
pub struct ParsedCitations {
    pub chunks: Vec<RetrievedChunk>,
    /// Array entries that were not JSON objects.
    pub skipped: usize,
}

/// Parse a JSON document and extract its citations.
pub fn parse_payload(text: &str) -> Result<ParsedCitations> {
    let value: Value = serde_json::from_str(text).context("Payload is not valid JSON")?;
    parse_citations(&value)
}

/// Extract citations from an already-parsed payload.
pub fn parse_citations(value: &Value) -> Result<ParsedCitations> {
    let entries: &[Value] = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match locate_citations(obj) {
            Some(items) => items,
            None => {
                tracing::debug!("payload has no citations array");
                &[]
            }
        },
        other => bail!(
            "Unsupported payload: expected an object or array, got {}",
            kind_of(other)
        ),
    };

    let mut parsed = ParsedCitations::default();
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_object() {
            Some(obj) => parsed.chunks.push(chunk_from_object(obj)),
            None => {
                tracing::warn!("skipping citation #{}: expected object, got {}", i, kind_of(entry));
                parsed.skipped += 1;
            }
        }
    }

    tracing::debug!(
        "parsed {} citations ({} skipped)",
        parsed.chunks.len(),
        parsed.skipped
    );
    Ok(parsed)
}

fn locate_citations(obj: &Map<String, Value>) -> Option<&[Value]> {
    obj.get("metadata")
        .and_then(|m| m.get("citations"))
        .and_then(Value::as_array)
        .or_else(|| obj.get("citations").and_then(Value::as_array))
        .map(Vec::as_slice)
}

fn chunk_from_object(obj: &Map<String, Value>) -> RetrievedChunk {
    RetrievedChunk {
        chunk_id: string_field(obj, &["chunkId", "chunk_id"]),
        doc_id: string_field(obj, &["docId", "doc_id"]),
        doc_title: string_field(obj, &["docTitle", "doc_title"]),
        node_id: string_field(obj, &["nodeId", "node_id"]),
        node_slug: string_field(obj, &["nodeSlug", "node_slug"]),
        knowledge_base_id: string_field(obj, &["knowledgeBaseId", "knowledge_base_id"]),
        document_url: string_field(obj, &["documentUrl", "document_url"]),
        score: number_field(obj, &["score"]),
        scores: obj
            .get("scores")
            .and_then(Value::as_object)
            .map(score_breakdown),
        snippet: string_field(obj, &["snippet"]),
        text: string_field(obj, &["text"]),
    }
}

fn score_breakdown(obj: &Map<String, Value>) -> ScoreBreakdown {
    ScoreBreakdown {
        vector: obj.get("vector").and_then(Value::as_f64),
        other: obj
            .iter()
            .filter(|(k, _)| k.as_str() != "vector")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}

/// First key present as a string (or a number, stringified).
fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(Value::as_f64)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
