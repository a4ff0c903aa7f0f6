//! Display text for a citation.
//!
//! A backend-provided `snippet` is shown as-is. Otherwise the chunk `text`
//! is flattened to one line and cut to a character budget, preferring a
//! word boundary.

use crate::models::RetrievedChunk;

/// Appended to text that was cut.
pub const ELLIPSIS: char = '…';

/// Text to show for `chunk`, at most `max_chars` characters of chunk text
/// (plus [`ELLIPSIS`] when cut). Returns an empty string when neither
/// `snippet` nor `text` has content, or when `max_chars` is 0.
pub fn display_snippet(chunk: &RetrievedChunk, max_chars: usize) -> String {
    if let Some(snippet) = non_blank(chunk.snippet.as_deref()) {
        return snippet.to_string();
    }
    match non_blank(chunk.text.as_deref()) {
        Some(text) => truncate_words(text, max_chars),
        None => String::new(),
    }
}

/// Collapse whitespace runs and cut to `max_chars` characters.
///
/// The cut lands on the last space inside the budget when there is one, and
/// never inside a multi-byte character.
pub fn truncate_words(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = match collapsed.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return collapsed,
    };

    let prefix = &collapsed[..cut];
    let prefix = if collapsed[cut..].starts_with(' ') {
        prefix
    } else {
        match prefix.rfind(' ') {
            Some(space) if space > 0 => &prefix[..space],
            _ => prefix,
        }
    };

    let mut out = prefix.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
