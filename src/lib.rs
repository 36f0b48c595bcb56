//! candprov - candidate providers for QA retrieval pipelines
//!
//! A candidate provider takes a query and returns a ranked shortlist of
//! document ids with similarity scores. This crate defines:
//! - The `CandidateProvider` contract and its result types
//! - Relevance label interpretation for ground-truth judgments
//! - The backend selector vocabulary and a registry keyed by it
//! - A dispatcher that honors each provider's thread-safety flag

pub mod types;
pub mod error;
pub mod cand_type;
pub mod relevance;
pub mod providers;
pub mod qrels;
pub mod registry;
pub mod dispatcher;
pub mod config;
pub mod server;

pub use types::*;
pub use error::{FormatError, RegistryError, RetrievalError};
pub use cand_type::CandType;
pub use relevance::is_relevant;
pub use providers::{CandidateProvider, StaticProvider};
pub use qrels::{Qrels, QrelsProvider};
pub use registry::{ProviderConfig, ProviderRegistry};
pub use dispatcher::{CandidateDispatcher, SharedDispatcher};
pub use config::Config;
