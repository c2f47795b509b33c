//! # channel-search
//!
//! A Rust client for a remote transcript-search engine: register YouTube
//! channels for indexing, trigger reindexing, and search their transcripts
//! with lexical, semantic, or blended retrieval.
//!
//! Retrieval, scoring and indexing all happen inside the engine. This crate
//! owns the request contract and the client-visible state around it.
//!
//! ## Architecture
//!
//! ```text
//!    ┌──────────────┐     ┌────────────────────┐     ┌──────────────────┐
//!    │ SearchPreset │────▶│   SearchStrategy   │────▶│  SearchRequest   │
//!    │ hybrid/bm25/ │     │ aggregation method │     │ q + JSON-array   │
//!    │ openai       │     │ syntactic/semantic │     │ query parameters │
//!    └──────────────┘     │ options            │     └────────┬─────────┘
//!                         └────────────────────┘              │ generation N
//!                                                             ▼
//!                                                  ┌────────────────────┐
//!                                                  │   remote engine    │
//!                                                  │ (BM25, embeddings, │
//!                                                  │  linear blending)  │
//!                                                  └─────────┬──────────┘
//!                                                            │ only N applies
//!                                                            ▼
//!                                                  ┌────────────────────┐
//!                                                  │    SearchView      │
//!                                                  │ error > loading >  │
//!                                                  │ empty > results    │
//!                                                  └────────────────────┘
//!
//!    ChannelRegistry ◀── list / add / remove / reindex ──▶ IndexingMachine
//!    (refetched after every mutation)           idle → indexing → completed → idle
//!                                                                 └→ error
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration and endpoint URLs
//! - [`models`] - Wire types: `Channel`, `SearchResult`, request/response bodies
//! - [`error`] - `ApiError` taxonomy and per-operation fallback messages
//! - [`search::strategy`] - Presets and the `SearchStrategy` descriptor
//! - [`search::request`] - Canonical query-string encoding
//! - [`search::session`] - Generation-guarded search state
//! - [`search::render`] - Display priority and relevance rounding
//! - [`indexing`] - Reindex state machine with an injectable clock
//! - [`registry`] - Cached channel list, input field and error slot
//! - [`api`] - HTTP client and the operations that drive shared state
//! - [`state`] - Shared client state

pub mod api;
pub mod config;
pub mod error;
pub mod indexing;
pub mod models;
pub mod registry;
pub mod search;
pub mod state;
