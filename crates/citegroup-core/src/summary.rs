//! Russian-aware count formatting for citation summaries.
//!
//! [`plural_form`] is the single pluralization rule used for every count this
//! workspace displays, so the same number never renders differently on two
//! surfaces.

use crate::models::DocumentGroup;

/// Pick the Russian grammatical-number form for `n`.
///
/// `one` for 1, 21, 31, ...; `few` for 2–4, 22–24, ...; `many` otherwise.
/// 11–14 always take `many`.
pub fn plural_form<'a>(n: usize, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let mod10 = n % 10;
    let mod100 = n % 100;
    if (11..=14).contains(&mod100) {
        return many;
    }
    match mod10 {
        1 => one,
        2..=4 => few,
        _ => many,
    }
}

/// `"{n} {form}"`, e.g. `format_count(3, "фрагмент", "фрагмента", "фрагментов")`
/// gives `"3 фрагмента"`.
pub fn format_count(n: usize, one: &str, few: &str, many: &str) -> String {
    format!("{} {}", n, plural_form(n, one, few, many))
}

/// Short summary of a grouped result.
///
/// One chunk per document collapses to a source count ("5 источников");
/// otherwise both counts are shown ("3 документа, 7 фрагментов").
pub fn summarize(groups: &[DocumentGroup]) -> String {
    let total_docs = groups.len();
    let total_chunks: usize = groups.iter().map(|g| g.chunks.len()).sum();

    if total_docs == total_chunks {
        return format_count(total_docs, "источник", "источника", "источников");
    }

    format!(
        "{}, {}",
        format_count(total_docs, "документ", "документа", "документов"),
        format_count(total_chunks, "фрагмент", "фрагмента", "фрагментов")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_document;
    use crate::models::RetrievedChunk;

    fn form(n: usize) -> &'static str {
        plural_form(n, "one", "few", "many")
    }

    fn one_chunk_each(n: usize) -> Vec<DocumentGroup> {
        let chunks: Vec<RetrievedChunk> = (0..n)
            .map(|i| RetrievedChunk::new(format!("doc-{}", i), 0.5))
            .collect();
        group_by_document(&chunks)
    }

    #[test]
    fn test_plural_basic_forms() {
        assert_eq!(form(0), "many");
        assert_eq!(form(1), "one");
        assert_eq!(form(2), "few");
        assert_eq!(form(4), "few");
        assert_eq!(form(5), "many");
        assert_eq!(form(10), "many");
    }

    #[test]
    fn test_plural_teens_are_many() {
        for n in 11..=14 {
            assert_eq!(form(n), "many", "n = {}", n);
        }
        assert_eq!(form(111), "many");
        assert_eq!(form(112), "many");
    }

    #[test]
    fn test_plural_after_teens() {
        assert_eq!(form(15), "many");
        assert_eq!(form(19), "many");
        assert_eq!(form(21), "one");
        assert_eq!(form(22), "few");
        assert_eq!(form(101), "one");
        assert_eq!(form(1004), "few");
    }

    #[test]
    fn test_summary_sources_many() {
        assert_eq!(summarize(&one_chunk_each(11)), "11 источников");
    }

    #[test]
    fn test_summary_sources_one() {
        assert_eq!(summarize(&one_chunk_each(21)), "21 источник");
        assert_eq!(summarize(&one_chunk_each(1)), "1 источник");
        assert_eq!(summarize(&one_chunk_each(3)), "3 источника");
    }

    #[test]
    fn test_summary_documents_and_fragments() {
        let chunks = vec![
            RetrievedChunk::new("A", 0.1),
            RetrievedChunk::new("A", 0.2),
            RetrievedChunk::new("B", 0.3),
            RetrievedChunk::new("C", 0.3),
            RetrievedChunk::new("C", 0.3),
            RetrievedChunk::new("C", 0.3),
            RetrievedChunk::new("C", 0.3),
        ];
        assert_eq!(summarize(&group_by_document(&chunks)), "3 документа, 7 фрагментов");
    }

    #[test]
    fn test_summary_single_document_many_fragments() {
        let chunks = vec![RetrievedChunk::new("A", 0.1), RetrievedChunk::new("A", 0.2)];
        assert_eq!(summarize(&group_by_document(&chunks)), "1 документ, 2 фрагмента");
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(summarize(&[]), "0 источников");
    }
}
