//! Catalog Module
//!
//! Keeps an in-memory copy of the open-data portal's dataset catalog.
//!
//! ## Overview
//! The catalog is rebuilt wholesale from the upstream CKAN registry; there is no
//! persistence. A `Snapshot` bundles the records with the similarity index built
//! over their names, and `CatalogStore` swaps whole snapshots so readers never
//! see a half-built one.
//!
//! ## Submodules
//! - **`error`**: Registry and refresh failures.
//! - **`refresh`**: Bounded-concurrency, single-flight refresh pipeline.
//! - **`registry`**: `Registry` trait and the CKAN HTTP client.
//! - **`store`**: Owner of the current snapshot.
//! - **`types`**: Records, snapshots and CKAN payloads.

pub mod error;
pub mod refresh;
pub mod registry;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
