//! Dispatches queries to a provider while honoring its thread-safety flag

use crate::error::RetrievalError;
use crate::providers::CandidateProvider;
use crate::types::*;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Shared front for one provider instance (thread-safe via Arc)
pub struct CandidateDispatcher {
    provider: Box<dyn CandidateProvider>,
    /// Present only for providers that are not thread-safe
    serial: Option<Mutex<()>>,
}

pub type SharedDispatcher = Arc<CandidateDispatcher>;

impl CandidateDispatcher {
    pub fn new(provider: Box<dyn CandidateProvider>) -> SharedDispatcher {
        let serial = if provider.is_thread_safe() {
            None
        } else {
            info!("Provider '{}' is not thread-safe; calls will be serialized", provider.name());
            Some(Mutex::new(()))
        };
        Arc::new(Self { provider, serial })
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn is_thread_safe(&self) -> bool {
        self.provider.is_thread_safe()
    }

    /// Run one query and verify the result contract
    pub async fn get_candidates(
        &self,
        query_num: usize,
        query_data: &QueryData,
        max_qty: usize,
    ) -> Result<CandidateInfo, RetrievalError> {
        let start = Instant::now();

        let info = match &self.serial {
            Some(lock) => {
                let _guard = lock.lock().await;
                self.provider.get_candidates(query_num, query_data, max_qty).await?
            }
            None => self.provider.get_candidates(query_num, query_data, max_qty).await?,
        };

        check_result(self.provider.name(), &info, max_qty)?;

        debug!(
            "Query #{}: {} candidates ({} found) in {}ms",
            query_num,
            info.len(),
            info.num_found,
            start.elapsed().as_millis()
        );
        Ok(info)
    }

    /// Run a batch of queries concurrently; results keep input order and the
    /// first failure is returned.
    pub async fn run_batch(
        &self,
        queries: &[QueryData],
        max_qty: usize,
    ) -> Result<Vec<CandidateInfo>, RetrievalError> {
        let start = Instant::now();

        let tasks = queries
            .iter()
            .enumerate()
            .map(|(query_num, data)| self.get_candidates(query_num, data, max_qty));
        let results = futures::future::join_all(tasks).await;

        let infos = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        info!(
            "Batch of {} queries against '{}' done in {}ms",
            infos.len(),
            self.provider.name(),
            start.elapsed().as_millis()
        );
        Ok(infos)
    }
}

/// Postconditions every provider result must satisfy
pub fn check_result(provider: &str, info: &CandidateInfo, max_qty: usize) -> Result<(), RetrievalError> {
    let violation = |reason: String| RetrievalError::ContractViolation {
        provider: provider.to_string(),
        reason,
    };
    if info.len() > max_qty {
        return Err(violation(format!("returned {} entries for max_qty {}", info.len(), max_qty)));
    }
    if info.num_found < info.len() {
        return Err(violation(format!(
            "num_found {} is less than the {} entries returned",
            info.num_found,
            info.len()
        )));
    }
    if !info.all_finite() {
        return Err(violation("entries contain a non-finite score".to_string()));
    }
    if !info.is_sorted() {
        return Err(violation("entries are not sorted by descending score".to_string()));
    }
    Ok(())
}
