//! Outbound links for cited documents.
//!
//! Builds an href from fields the grouping pass carries through; never
//! performs I/O.

use crate::models::DocumentGroup;

/// Link to the cited document, if enough is known to build one.
///
/// | Available fields | Result |
/// |------------------|--------|
/// | `document_url` | the URL, unchanged |
/// | `knowledge_base_id` + `node_slug`/`node_id` | `{base_url}/knowledge/{kb}/{node}` |
/// | anything else | `None` |
///
/// The slug is preferred over the node id. Path segments are
/// percent-encoded; a trailing `/` on `base_url` is ignored.
pub fn citation_href(group: &DocumentGroup, base_url: &str) -> Option<String> {
    if let Some(url) = present(group.document_url.as_deref()) {
        return Some(url.to_string());
    }

    let kb = present(group.knowledge_base_id.as_deref())?;
    let node = present(group.node_slug.as_deref()).or_else(|| present(group.node_id.as_deref()))?;

    Some(format!(
        "{}/knowledge/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(kb),
        urlencoding::encode(node)
    ))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
