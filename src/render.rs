//! Presentation of grouped citations as text or JSON.
//!
//! [`build_view`] runs the grouping pass and decorates each group with its
//! link, rank, and the requested page of snippets. The text and JSON
//! renderers only format that view.

use anyhow::Result;
use serde::Serialize;

use citegroup_core::group::group_by_document;
use citegroup_core::links::citation_href;
use citegroup_core::models::{DocumentGroup, RetrievedChunk};
use citegroup_core::paginate::{paginate, Page};
use citegroup_core::snippet::display_snippet;
use citegroup_core::summary::{format_count, summarize};

use crate::config::Config;

/// Everything a presenter needs to show one message's citations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationView {
    pub summary: String,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    /// 1-based display rank.
    pub rank: usize,
    pub doc_id: String,
    pub doc_title: String,
    pub top_score: f64,
    pub total_score: f64,
    pub node_id: Option<String>,
    pub node_slug: Option<String>,
    pub href: Option<String>,
    pub chunks: Page<ChunkView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkView {
    pub chunk_id: Option<String>,
    pub score: f64,
    pub snippet: String,
}

/// Group `chunks` and build the view for chunk page `page` of every group.
pub fn build_view(
    chunks: &[RetrievedChunk],
    config: &Config,
    page: usize,
    page_size: Option<usize>,
) -> CitationView {
    let groups = group_by_document(chunks);
    let page_size = page_size.unwrap_or(config.display.page_size);

    tracing::debug!(
        "grouped {} chunks into {} documents",
        chunks.len(),
        groups.len()
    );

    CitationView {
        summary: summarize(&groups),
        groups: groups
            .iter()
            .enumerate()
            .map(|(i, group)| group_view(i + 1, group, config, page, page_size))
            .collect(),
    }
}

fn group_view(
    rank: usize,
    group: &DocumentGroup,
    config: &Config,
    page: usize,
    page_size: usize,
) -> GroupView {
    let chunk_views: Vec<ChunkView> = group
        .chunks
        .iter()
        .map(|c| ChunkView {
            chunk_id: c.chunk_id.clone(),
            score: c.effective_score(),
            snippet: display_snippet(c, config.display.snippet_max_chars),
        })
        .collect();

    GroupView {
        rank,
        doc_id: group.doc_id.clone(),
        doc_title: group.doc_title.clone(),
        top_score: group.top_score,
        total_score: group.total_score,
        node_id: group.node_id.clone(),
        node_slug: group.node_slug.clone(),
        href: citation_href(group, &config.links.base_url),
        chunks: paginate(&chunk_views, page, page_size),
    }
}

/// Human-readable listing, one block per document.
pub fn render_text(view: &CitationView) -> String {
    let mut out = String::new();
    out.push_str(&view.summary);
    out.push('\n');

    if view.groups.is_empty() {
        out.push_str("Нет источников.\n");
        return out;
    }

    for group in &view.groups {
        out.push('\n');
        out.push_str(&format!(
            "{}. [{:.2}] {}\n",
            group.rank, group.top_score, group.doc_title
        ));
        if !group.doc_id.is_empty() {
            out.push_str(&format!("    doc: {}\n", group.doc_id));
        }
        if let Some(ref href) = group.href {
            out.push_str(&format!("    url: {}\n", href));
        }
        for chunk in &group.chunks.items {
            let snippet = if chunk.snippet.is_empty() {
                "(без текста)"
            } else {
                chunk.snippet.as_str()
            };
            out.push_str(&format!("    - [{:.2}] {}\n", chunk.score, snippet));
        }
        if group.chunks.total_pages > 1 {
            out.push_str(&format!(
                "    страница {} из {}, всего {}\n",
                group.chunks.page,
                group.chunks.total_pages,
                format_count(
                    group.chunks.total_items,
                    "фрагмент",
                    "фрагмента",
                    "фрагментов"
                )
            ));
        }
    }

    out
}

pub fn render_json(view: &CitationView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
