//! Abuse Guard Module
//!
//! Tracks clients that keep asking questions nothing in the catalog answers.
//! After more than `max_misses` consecutive misses inside the sliding window the
//! guard signals a fallback (example topics are shown instead of a plain "not
//! found") and resets the client.
//!
//! Every call prunes expired entries first, so memory stays bounded without a
//! background sweeper. Prune, lookup and update happen under one lock.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
