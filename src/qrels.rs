//! Relevance judgments (TREC qrels) and the provider backed by them

use crate::error::{FormatError, RetrievalError};
use crate::providers::{check_max_qty, CandidateProvider};
use crate::relevance::{is_relevant, parse_label};
use crate::types::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One judged document for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgment {
    pub doc_id: String,
    /// Raw label text; interpreted with [`is_relevant`]
    pub label: String,
}

/// Judgments grouped by query id, in file order
#[derive(Debug, Clone, Default)]
pub struct Qrels {
    by_query: HashMap<String, Vec<Judgment>>,
}

impl Qrels {
    /// Load a whitespace-separated `query_id iteration doc_id label` file
    pub fn load(path: &Path) -> Result<Self, RetrievalError> {
        let text = fs::read_to_string(path).map_err(|e| {
            RetrievalError::BackendUnavailable(format!("cannot read qrels {}: {}", path.display(), e))
        })?;
        let qrels = Self::parse(&text, &path.display().to_string())?;
        info!(
            "Loaded {} judgments for {} queries from {}",
            qrels.num_judgments(),
            qrels.num_queries(),
            path.display()
        );
        Ok(qrels)
    }

    /// Parse qrels text; `source` names the input in error messages
    pub fn parse(text: &str, source: &str) -> Result<Self, RetrievalError> {
        let mut qrels = Self::default();
        for (line_no, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 4 {
                return Err(RetrievalError::Backend(format!(
                    "{}:{}: expected 'query_id iteration doc_id label', got '{}'",
                    source,
                    line_no + 1,
                    line.trim()
                )));
            }
            qrels.add(fields[0], fields[2], fields[3]);
        }
        Ok(qrels)
    }

    /// Record a judgment; a repeated `(query, doc)` pair keeps its position
    /// and takes the newer label.
    pub fn add(&mut self, query_id: &str, doc_id: &str, label: &str) {
        let judgments = self.by_query.entry(query_id.to_string()).or_default();
        match judgments.iter_mut().find(|j| j.doc_id == doc_id) {
            Some(existing) => existing.label = label.to_string(),
            None => judgments.push(Judgment {
                doc_id: doc_id.to_string(),
                label: label.to_string(),
            }),
        }
    }

    pub fn judgments(&self, query_id: &str) -> &[Judgment] {
        self.by_query.get(query_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Label of a document for a query, `None` when unjudged
    pub fn label(&self, query_id: &str, doc_id: &str) -> Option<&str> {
        self.judgments(query_id)
            .iter()
            .find(|j| j.doc_id == doc_id)
            .map(|j| j.label.as_str())
    }

    /// Number of retrieved candidates judged relevant for `query_id`
    pub fn count_relevant(
        &self,
        query_id: &str,
        candidates: &CandidateInfo,
        min_rel_level: i32,
    ) -> Result<usize, FormatError> {
        let mut count = 0;
        for doc_id in candidates.doc_ids() {
            if is_relevant(self.label(query_id, doc_id), min_rel_level)? {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn num_queries(&self) -> usize {
        self.by_query.len()
    }

    pub fn num_judgments(&self) -> usize {
        self.by_query.values().map(Vec::len).sum()
    }
}

/// Oracle provider: returns the judged-relevant documents of a query.
///
/// The query id is read from `ID_FIELD_NAME`; each candidate's score is its
/// relevance grade.
pub struct QrelsProvider {
    qrels: Qrels,
    min_rel_level: i32,
}

impl QrelsProvider {
    pub fn new(qrels: Qrels, min_rel_level: i32) -> Self {
        Self {
            qrels,
            min_rel_level,
        }
    }

    pub fn qrels(&self) -> &Qrels {
        &self.qrels
    }
}

#[async_trait]
impl CandidateProvider for QrelsProvider {
    fn is_thread_safe(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "qrels"
    }

    async fn get_candidates(
        &self,
        query_num: usize,
        query_data: &QueryData,
        max_qty: usize,
    ) -> Result<CandidateInfo, RetrievalError> {
        check_max_qty(max_qty)?;
        let query_id = query_data
            .get(ID_FIELD_NAME)
            .ok_or_else(|| RetrievalError::missing_field(ID_FIELD_NAME))?;

        let mut entries = Vec::new();
        for judgment in self.qrels.judgments(query_id) {
            let grade = parse_label(&judgment.label)?;
            if grade >= self.min_rel_level {
                entries.push(CandidateEntry::new(judgment.doc_id.clone(), grade as f32));
            }
        }

        let info = CandidateInfo::from_unsorted(entries, max_qty);
        debug!(
            "qrels: query #{} ({}) -> {} of {} relevant",
            query_num,
            query_id,
            info.len(),
            info.num_found
        );
        Ok(info)
    }
}
