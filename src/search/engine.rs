use super::tokenizer::fold_case;
use super::types::{MatchStage, Matches};
use crate::catalog::types::{DatasetRecord, Snapshot};

/// Similarity a record name must strictly exceed in the fallback stage.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.2;

/// Two-stage match of `query` against one snapshot.
///
/// Stage one keeps records whose name or explanation contains the query,
/// ignoring case but not accents. Only when it finds nothing does stage two
/// compare the normalized query against the snapshot's name index. Both
/// stages return records in catalog order.
pub fn find_matches(query: &str, snapshot: &Snapshot, threshold: f64) -> Matches {
    let exact = substring_matches(query, &snapshot.records);
    if !exact.is_empty() {
        tracing::debug!("'{}' matched {} record(s) by substring", query, exact.len());
        return Matches {
            stage: Some(MatchStage::Substring),
            records: exact,
        };
    }

    let similar = similarity_matches(query, snapshot, threshold);
    if similar.is_empty() {
        tracing::debug!("'{}' matched nothing", query);
        return Matches::none();
    }

    tracing::debug!("'{}' matched {} record(s) by similarity", query, similar.len());
    Matches {
        stage: Some(MatchStage::Similarity),
        records: similar,
    }
}

pub fn substring_matches(query: &str, records: &[DatasetRecord]) -> Vec<DatasetRecord> {
    let needle = fold_case(query);
    records
        .iter()
        .filter(|record| {
            fold_case(&record.name).contains(&needle)
                || fold_case(&record.explanation).contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn similarity_matches(query: &str, snapshot: &Snapshot, threshold: f64) -> Vec<DatasetRecord> {
    snapshot
        .index
        .similarities(query)
        .into_iter()
        .zip(snapshot.records.iter())
        .filter(|(similarity, _)| *similarity > threshold)
        .map(|(_, record)| record.clone())
        .collect()
}
