//! Open-Data Dataset Finder Library
//!
//! Answers free-text questions against the dataset catalog of a CKAN open-data
//! portal. The binary (`main.rs`) wires these modules into an HTTP service.
//!
//! ## Architecture Modules
//! - **`catalog`**: In-memory snapshot of the portal's datasets, refreshed from
//!   the upstream registry with bounded concurrency and swapped atomically.
//! - **`search`**: Two-stage matcher (case-insensitive substring, then TF-IDF
//!   cosine similarity over diacritic-folded names).
//! - **`guard`**: Per-client sliding-window counter of unmatched questions that
//!   decides when to offer example topics instead.
//! - **`api`**: Question cleaning, orchestration and the HTTP handlers.
//! - **`config`**: Defaults and environment overrides.

pub mod api;
pub mod catalog;
pub mod config;
pub mod guard;
pub mod search;
