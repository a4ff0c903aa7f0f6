//! Per-document citation grouping and ranking.
//!
//! Turns a flat list of retrieved chunks into one [`DocumentGroup`] per
//! cited document, so a presenter can show "N documents, M fragments" and
//! open the most relevant document (and its most relevant fragment) first.
//!
//! # Algorithm
//!
//! 1. Fold the input, in order, into insertion-ordered accumulators keyed by
//!    [`RetrievedChunk::group_key`]. A new group takes its node pointers from
//!    the chunk that created it and a placeholder title `"Документ N"`, where
//!    N is the 1-based creation ordinal.
//! 2. Each chunk adds its [`effective_score`](RetrievedChunk::effective_score)
//!    to `total_score` and raises `top_score` if higher.
//! 3. Stable-sort groups by `top_score` (desc). Ties keep creation order, so
//!    placeholder numbers never contradict the displayed rank among equals.
//! 4. Stable-sort each group's chunks by effective score (desc).

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{DocumentGroup, RetrievedChunk};

/// Prefix of the title given to documents that arrive without one.
pub const PLACEHOLDER_TITLE_PREFIX: &str = "Документ";

/// Running state for one document while folding the input.
struct GroupAcc {
    group: DocumentGroup,
    titled: bool,
}

impl GroupAcc {
    fn open(chunk: &RetrievedChunk, ordinal: usize) -> Self {
        let title = chunk.title().map(str::to_string);
        Self {
            titled: title.is_some(),
            group: DocumentGroup {
                doc_id: chunk.group_key().to_string(),
                doc_title: title
                    .unwrap_or_else(|| format!("{} {}", PLACEHOLDER_TITLE_PREFIX, ordinal)),
                node_id: chunk.node_id.clone(),
                node_slug: chunk.node_slug.clone(),
                knowledge_base_id: chunk.knowledge_base_id.clone(),
                document_url: chunk.document_url.clone(),
                chunks: Vec::new(),
                top_score: chunk.effective_score(),
                total_score: 0.0,
            },
        }
    }

    fn push(&mut self, chunk: &RetrievedChunk) {
        if !self.titled {
            if let Some(title) = chunk.title() {
                self.group.doc_title = title.to_string();
                self.titled = true;
            }
        }
        let score = chunk.effective_score();
        self.group.total_score += score;
        if score > self.group.top_score {
            self.group.top_score = score;
        }
        self.group.chunks.push(chunk.clone());
    }
}

/// Group `chunks` by document and rank groups and their chunks by relevance.
///
/// Never fails: missing fields fall back to documented defaults, chunks
/// without a `doc_id` share the `""` group, and an empty input yields an
/// empty output. The returned groups own fresh copies of the chunks.
pub fn group_by_document(chunks: &[RetrievedChunk]) -> Vec<DocumentGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut accs: Vec<GroupAcc> = Vec::new();

    for chunk in chunks {
        let slot = *index.entry(chunk.group_key()).or_insert_with(|| {
            accs.push(GroupAcc::open(chunk, accs.len() + 1));
            accs.len() - 1
        });
        accs[slot].push(chunk);
    }

    let mut groups: Vec<DocumentGroup> = accs.into_iter().map(|acc| acc.group).collect();

    groups.sort_by(|a, b| descending(a.top_score, b.top_score));
    for group in &mut groups {
        group
            .chunks
            .sort_by(|a, b| descending(a.effective_score(), b.effective_score()));
    }

    groups
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
