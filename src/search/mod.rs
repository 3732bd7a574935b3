//! Search Module
//!
//! Decides which catalog records satisfy a free-text query.
//!
//! ## Pipeline
//! 1. **Substring stage**: case-insensitive containment of the raw query in a
//!    record's name or explanation. Accents are *not* folded here.
//! 2. **Similarity stage**: runs only when stage one finds nothing. The query is
//!    normalized (lowercase, diacritics stripped), projected into the TF-IDF
//!    space built over the snapshot's names, and every record whose cosine
//!    similarity exceeds the threshold is returned.
//!
//! Results are never ranked by score; they keep catalog order.
//!
//! ## Submodules
//! - **`engine`**: The two-stage matcher.
//! - **`index`**: TF-IDF vectors and cosine similarity.
//! - **`tokenizer`**: Case folding, diacritic folding and term splitting.
//! - **`types`**: Match results.

pub mod engine;
pub mod index;
pub mod tokenizer;
pub mod types;
