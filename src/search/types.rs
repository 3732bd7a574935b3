use crate::catalog::types::DatasetRecord;
use serde::Serialize;

/// Which matching stage produced a result.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MatchStage {
    /// Case-insensitive containment in the name or explanation.
    Substring,
    /// TF-IDF cosine similarity over normalized names.
    Similarity,
}

/// Records that satisfied a query, in catalog order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Matches {
    /// `None` when nothing matched.
    pub stage: Option<MatchStage>,
    pub records: Vec<DatasetRecord>,
}

impl Matches {
    pub fn none() -> Self {
        Self {
            stage: None,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
