//! Selector-keyed construction of candidate providers

use crate::cand_type::CandType;
use crate::error::RegistryError;
use crate::providers::CandidateProvider;
use crate::qrels::{Qrels, QrelsProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

/// Construction-time settings handed to provider factories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub qrels_path: Option<PathBuf>,

    #[serde(default = "default_min_rel_level")]
    pub min_rel_level: i32,
}

fn default_min_rel_level() -> i32 {
    1
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            qrels_path: None,
            min_rel_level: default_min_rel_level(),
        }
    }
}

pub type ProviderFactory =
    Box<dyn Fn(&ProviderConfig) -> Result<Box<dyn CandidateProvider>, RegistryError> + Send + Sync>;

/// Maps backend selectors to factories
pub struct ProviderRegistry {
    factories: HashMap<CandType, ProviderFactory>,
}

impl ProviderRegistry {
    /// Registry without any backends
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the in-crate backends (`qrels`)
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(CandType::Qrels, Box::new(build_qrels));
        registry
    }

    /// Register (or replace) the factory for a backend
    pub fn register(&mut self, cand_type: CandType, factory: ProviderFactory) {
        self.factories.insert(cand_type, factory);
    }

    pub fn is_registered(&self, cand_type: CandType) -> bool {
        self.factories.contains_key(&cand_type)
    }

    pub fn create(
        &self,
        cand_type: CandType,
        config: &ProviderConfig,
    ) -> Result<Box<dyn CandidateProvider>, RegistryError> {
        let factory = self
            .factories
            .get(&cand_type)
            .ok_or(RegistryError::NotRegistered(cand_type))?;
        let provider = factory(config)?;
        info!(
            "Created candidate provider '{}' (type {}, thread-safe: {})",
            provider.name(),
            cand_type,
            provider.is_thread_safe()
        );
        Ok(provider)
    }

    /// Parse an external selector string and build the matching provider
    pub fn create_from_selector(
        &self,
        selector: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn CandidateProvider>, RegistryError> {
        self.create(selector.parse()?, config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn build_qrels(config: &ProviderConfig) -> Result<Box<dyn CandidateProvider>, RegistryError> {
    let path = config
        .qrels_path
        .as_ref()
        .ok_or(RegistryError::MissingSetting {
            cand_type: CandType::Qrels,
            setting: "qrels_path",
        })?;
    let qrels = Qrels::load(path)?;
    Ok(Box::new(QrelsProvider::new(qrels, config.min_rel_level)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StaticProvider;
    use std::io::Write;

    #[test]
    fn test_unknown_selector_rejected() {
        let registry = ProviderRegistry::with_defaults();
        let result = registry.create_from_selector("elastic", &ProviderConfig::default());
        assert!(matches!(result, Err(RegistryError::UnknownSelector(_))));
    }

    #[test]
    fn test_unregistered_backend() {
        let registry = ProviderRegistry::with_defaults();
        for t in [CandType::Solr, CandType::Lucene, CandType::LuceneGiza, CandType::Nmslib, CandType::KnnJava] {
            assert!(!registry.is_registered(t));
            assert!(matches!(
                registry.create(t, &ProviderConfig::default()),
                Err(RegistryError::NotRegistered(x)) if x == t
            ));
        }
    }

    #[test]
    fn test_qrels_requires_path() {
        let registry = ProviderRegistry::with_defaults();
        assert!(matches!(
            registry.create(CandType::Qrels, &ProviderConfig::default()),
            Err(RegistryError::MissingSetting { setting: "qrels_path", .. })
        ));
    }

    #[test]
    fn test_qrels_from_selector() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "q1 0 d1 2").unwrap();
        let config = ProviderConfig {
            qrels_path: Some(file.path().to_path_buf()),
            min_rel_level: 1,
        };

        let provider = ProviderRegistry::with_defaults()
            .create_from_selector("qrels", &config)
            .unwrap();
        assert_eq!(provider.name(), "qrels");
        assert!(provider.is_thread_safe());
    }

    #[test]
    fn test_register_external_backend() {
        fn fake_lucene(_: &ProviderConfig) -> Result<Box<dyn CandidateProvider>, RegistryError> {
            Ok(Box::new(StaticProvider::new("fake_lucene")))
        }

        let mut registry = ProviderRegistry::empty();
        registry.register(CandType::Lucene, Box::new(fake_lucene));
        let provider = registry
            .create_from_selector("lucene", &ProviderConfig::default())
            .unwrap();
        assert_eq!(provider.name(), "fake_lucene");
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ProviderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.min_rel_level, 1);
        assert!(config.qrels_path.is_none());
    }
}
