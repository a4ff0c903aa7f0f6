//! # citegroup
//!
//! Group, rank, and summarize the citations a RAG assistant attaches to its
//! chat messages.
//!
//! The backend returns retrieval results as a flat list under a message's
//! `metadata.citations`. This crate reads such payloads (file, stdin, or a
//! REST `GET`), hands the chunks to [`citegroup_core`] for per-document
//! grouping and ranking, and prints the result for people or scripts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌────────────────┐   ┌──────────┐
//! │ file / stdin │──▶│   payload   │──▶│ citegroup-core │──▶│  render  │
//! │ REST GET     │   │  (lenient)  │   │ group + rank   │   │ text/json│
//! └──────────────┘   └─────────────┘   └────────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cite group message.json                 # ranked listing
//! cite group message.json --format json   # machine-readable
//! cite summary https://api.example.com/chats/1/messages/42
//! cat message.json | cite group - --page 2
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`source`] | Payload loading: file, stdin, REST with retries |
//! | [`payload`] | Lenient extraction of `metadata.citations` |
//! | [`render`] | Grouped view with links and pages; text and JSON output |
//! | [`group_cmd`] | `cite group` / `cite summary` entry points |

pub mod config;
pub mod group_cmd;
pub mod payload;
pub mod render;
pub mod source;

pub use citegroup_core::models::{DocumentGroup, RetrievedChunk};
