//! The candidate provider contract

use crate::error::RetrievalError;
use crate::types::*;
use async_trait::async_trait;
use std::collections::HashMap;

/// Uniform interface through which any retrieval backend is queried
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// True if `get_candidates` may be called concurrently on this instance.
    /// Callers must serialize access when this is false.
    fn is_thread_safe(&self) -> bool;

    fn name(&self) -> &str;

    /// Return at most `max_qty` candidates sorted by descending score, plus
    /// the total number of matches the backend located.
    ///
    /// `query_num` is an ordinal used only to correlate log lines.
    async fn get_candidates(
        &self,
        query_num: usize,
        query_data: &QueryData,
        max_qty: usize,
    ) -> Result<CandidateInfo, RetrievalError>;
}

/// Reject a zero `max_qty` before touching the backend
pub fn check_max_qty(max_qty: usize) -> Result<(), RetrievalError> {
    if max_qty == 0 {
        return Err(RetrievalError::InvalidMaxQty(max_qty));
    }
    Ok(())
}

/// Provider over fixed, per-query candidate lists keyed by `ID_FIELD_NAME`
pub struct StaticProvider {
    name: String,
    thread_safe: bool,
    candidates: HashMap<String, Vec<CandidateEntry>>,
}

impl StaticProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thread_safe: true,
            candidates: HashMap::new(),
        }
    }

    pub fn with_thread_safe(mut self, thread_safe: bool) -> Self {
        self.thread_safe = thread_safe;
        self
    }

    /// Register the candidates returned for `query_id`, in discovery order
    pub fn with_query(mut self, query_id: impl Into<String>, entries: Vec<CandidateEntry>) -> Self {
        self.candidates.insert(query_id.into(), entries);
        self
    }
}

#[async_trait]
impl CandidateProvider for StaticProvider {
    fn is_thread_safe(&self) -> bool {
        self.thread_safe
    }

    fn name(&self) -> &str {
        &self.name
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

        let info = match self.candidates.get(query_id) {
            Some(entries) => {
                if let Some(bad) = entries.iter().find(|e| !e.score.is_finite()) {
                    return Err(RetrievalError::Backend(format!(
                        "{}: document '{}' has non-finite score {}",
                        self.name, bad.doc_id, bad.score
                    )));
                }
                CandidateInfo::from_unsorted(entries.clone(), max_qty)
            }
            None => CandidateInfo::empty(),
        };
        tracing::debug!(
            "{}: query #{} ({}) -> {} of {} candidates",
            self.name,
            query_num,
            query_id,
            info.len(),
            info.num_found
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: &str) -> QueryData {
        QueryData::from([(ID_FIELD_NAME.to_string(), id.to_string())])
    }

    #[tokio::test]
    async fn test_static_provider_sorts_and_caps() {
        let provider = StaticProvider::new("static").with_query(
            "q1",
            vec![
                CandidateEntry::new("a", 0.1),
                CandidateEntry::new("b", 0.7),
                CandidateEntry::new("c", 0.4),
            ],
        );

        let info = provider.get_candidates(0, &query("q1"), 2).await.unwrap();
        assert_eq!(info.doc_ids().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(info.num_found, 3);
    }

    #[tokio::test]
    async fn test_static_provider_rejects_nan_score() {
        let provider = StaticProvider::new("static").with_query(
            "q1",
            vec![CandidateEntry::new("a", 0.5), CandidateEntry::new("b", f32::NAN)],
        );
        let err = provider.get_candidates(0, &query("q1"), 5).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Backend(msg) if msg.contains("'b'")));
    }

    #[tokio::test]
    async fn test_static_provider_unknown_query() {
        let provider = StaticProvider::new("static");
        let info = provider.get_candidates(0, &query("nope"), 5).await.unwrap();
        assert!(info.is_empty());
        assert_eq!(info.num_found, 0);
    }

    #[tokio::test]
    async fn test_static_provider_rejects_bad_input() {
        let provider = StaticProvider::new("static");
        assert!(matches!(
            provider.get_candidates(0, &query("q"), 0).await,
            Err(RetrievalError::InvalidMaxQty(0))
        ));
        assert!(matches!(
            provider.get_candidates(0, &QueryData::new(), 3).await,
            Err(RetrievalError::MalformedQuery { .. })
        ));
    }
}
