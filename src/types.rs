//! Core type definitions shared by every candidate provider

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Field holding a document (or query) identifier
pub const ID_FIELD_NAME: &str = "DOCNO";
/// Canonical full-text field; typically a bag-of-words query
pub const TEXT_FIELD_NAME: &str = "Text_bm25";

/// Per-query input: field name -> field value
pub type QueryData = HashMap<String, String>;

/// A document identifier with its similarity score (no document text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub doc_id: String,
    pub score: f32,
}

impl CandidateEntry {
    pub fn new(doc_id: impl Into<String>, score: f32) -> Self {
        Self {
            doc_id: doc_id.into(),
            score,
        }
    }
}

/// Sorted, length-capped candidates plus the total number of matches found
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub entries: Vec<CandidateEntry>,
    pub num_found: usize,
}

impl CandidateInfo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result set from matches in discovery order.
    ///
    /// Entries are ordered by descending score; equal scores keep the order
    /// in which the backend produced them. `num_found` is the number of
    /// matches before truncation to `max_qty`. Scores are expected to be
    /// finite; see [`CandidateInfo::all_finite`].
    pub fn from_unsorted(mut entries: Vec<CandidateEntry>, max_qty: usize) -> Self {
        let num_found = entries.len();
        // sort_by is stable
        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        entries.truncate(max_qty);
        Self { entries, num_found }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if scores are non-increasing (false if any pair is unordered)
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].score >= w[1].score)
    }

    /// True if no score is NaN or infinite
    pub fn all_finite(&self) -> bool {
        self.entries.iter().all(|e| e.score.is_finite())
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.doc_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unsorted_orders_and_truncates() {
        let info = CandidateInfo::from_unsorted(
            vec![
                CandidateEntry::new("d1", 0.2),
                CandidateEntry::new("d2", 0.9),
                CandidateEntry::new("d3", 0.5),
            ],
            2,
        );
        assert_eq!(info.num_found, 3);
        assert_eq!(info.doc_ids().collect::<Vec<_>>(), vec!["d2", "d3"]);
        assert!(info.is_sorted());
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let info = CandidateInfo::from_unsorted(
            vec![
                CandidateEntry::new("b", 1.0),
                CandidateEntry::new("a", 1.0),
                CandidateEntry::new("c", 2.0),
            ],
            10,
        );
        assert_eq!(info.doc_ids().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_signed_zero_scores_are_ties() {
        let info = CandidateInfo::from_unsorted(
            vec![
                CandidateEntry::new("neg", -0.0),
                CandidateEntry::new("pos", 0.0),
                CandidateEntry::new("top", 0.5),
            ],
            10,
        );
        assert_eq!(info.doc_ids().collect::<Vec<_>>(), vec!["top", "neg", "pos"]);
        assert!(info.is_sorted());
    }

    #[test]
    fn test_non_finite_scores_detected() {
        let info = CandidateInfo {
            entries: vec![CandidateEntry::new("b", f32::NAN), CandidateEntry::new("a", 0.5)],
            num_found: 2,
        };
        assert!(!info.all_finite());
        assert!(!info.is_sorted());

        let inf = CandidateInfo {
            entries: vec![CandidateEntry::new("x", f32::INFINITY)],
            num_found: 1,
        };
        assert!(!inf.all_finite());
        assert!(CandidateInfo::empty().all_finite());
    }

    #[test]
    fn test_is_sorted_detects_inversion() {
        let info = CandidateInfo {
            entries: vec![CandidateEntry::new("x", 0.1), CandidateEntry::new("y", 0.3)],
            num_found: 2,
        };
        assert!(!info.is_sorted());
    }
}
