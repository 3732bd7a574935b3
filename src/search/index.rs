//! TF-IDF similarity index over dataset names.
//!
//! Terms are weighted with raw term frequency times a smoothed inverse
//! document frequency, `ln((1 + n) / (1 + df)) + 1`, and every vector is
//! L2-normalized, so the cosine similarity of two vectors is their dot product.
//! Query terms that never occur in the indexed names carry no weight.

use super::tokenizer::{normalize_text, tokenize_text};
use std::collections::{HashMap, HashSet};

/// Sparse vector as `(term id, weight)` pairs sorted by term id.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl SimilarityIndex {
    /// Fits the vocabulary on `names` and stores one vector per name, in order.
    pub fn build<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let documents: Vec<Vec<String>> = names
            .into_iter()
            .map(|name| tokenize_text(&normalize_text(name)))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for terms in &documents {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term.to_string()).or_insert(next_id);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[id] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(documents.len()),
        };
        index.rows = documents.iter().map(|terms| index.weigh(terms)).collect();
        index
    }

    /// Number of indexed names.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Projects free text into the index space. The text is normalized here.
    pub fn query_vector(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize_text(&normalize_text(text)))
    }

    /// Cosine similarity of `text` against every indexed name, in index order.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let query = self.query_vector(text);
        self.rows.iter().map(|row| dot(row, &query)).collect()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&id) = self.vocabulary.get(term) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();
        vector.sort_by_key(|(id, _)| *id);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in vector.iter_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Dot product of two id-sorted sparse vectors.
fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
