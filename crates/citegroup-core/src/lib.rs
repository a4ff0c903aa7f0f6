//! # citegroup core
//!
//! Pure, I/O-free logic for turning a flat list of retrieved RAG chunks into
//! a ranked, per-document citation tree: data models, the grouping and
//! ranking pass, Russian-aware count summaries, snippet resolution, chunk
//! pagination, and citation link building.
//!
//! Nothing in this crate touches the filesystem, the network, or a runtime.
//! Every function is total over its inputs.
//!
//! ```rust
//! use citegroup_core::group::group_by_document;
//! use citegroup_core::models::RetrievedChunk;
//! use citegroup_core::summary::summarize;
//!
//! let chunks = vec![
//!     RetrievedChunk::new("A", 0.2),
//!     RetrievedChunk::new("B", 0.8),
//!     RetrievedChunk::new("A", 0.3),
//! ];
//! let groups = group_by_document(&chunks);
//! assert_eq!(groups[0].doc_id, "B");
//! assert_eq!(summarize(&groups), "2 документа, 3 фрагмента");
//! ```

pub mod group;
pub mod links;
pub mod models;
pub mod paginate;
pub mod snippet;
pub mod summary;
