//! Error taxonomy for relevance labels, retrieval and provider construction

use crate::cand_type::CandType;
use thiserror::Error;

/// A relevance label was present but not an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Label '{label}' is not numeric!")]
pub struct FormatError {
    pub label: String,
}

/// Failure of a `get_candidates` call
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("max_qty must be positive, got {0}")]
    InvalidMaxQty(usize),

    #[error("malformed query data: field '{field}' {reason}")]
    MalformedQuery { field: String, reason: String },

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("provider '{provider}' broke the result contract: {reason}")]
    ContractViolation { provider: String, reason: String },
}

impl RetrievalError {
    pub fn missing_field(field: &str) -> Self {
        Self::MalformedQuery {
            field: field.to_string(),
            reason: "is missing".to_string(),
        }
    }
}

/// Failure to turn a selector string into a provider instance
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown candidate provider type '{0}'; expected one of: qrels, solr, lucene, lucene_giza, nmslib, knn_java")]
    UnknownSelector(String),

    #[error("no backend registered for candidate provider type '{0}'")]
    NotRegistered(CandType),

    #[error("candidate provider type '{cand_type}' requires setting '{setting}'")]
    MissingSetting {
        cand_type: CandType,
        setting: &'static str,
    },

    #[error("failed to load provider: {0}")]
    Load(#[from] RetrievalError),
}
