//! Backend selector vocabulary

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized candidate provider backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandType {
    /// In-memory relevance judgments
    Qrels,
    /// External search server
    Solr,
    /// Local inverted index
    Lucene,
    /// Local inverted index with translation tables
    LuceneGiza,
    /// Approximate nearest-neighbor index
    Nmslib,
    /// In-process nearest-neighbor search
    KnnJava,
}

impl CandType {
    pub const ALL: [CandType; 6] = [
        CandType::Qrels,
        CandType::Solr,
        CandType::Lucene,
        CandType::LuceneGiza,
        CandType::Nmslib,
        CandType::KnnJava,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandType::Qrels => "qrels",
            CandType::Solr => "solr",
            CandType::Lucene => "lucene",
            CandType::LuceneGiza => "lucene_giza",
            CandType::Nmslib => "nmslib",
            CandType::KnnJava => "knn_java",
        }
    }

    /// Help text for a provider-type option
    pub fn description() -> String {
        let listed = [
            CandType::Lucene,
            CandType::Qrels,
            CandType::Solr,
            CandType::KnnJava,
            CandType::Nmslib,
            CandType::LuceneGiza,
        ];
        let names: Vec<&str> = listed.iter().map(|t| t.as_str()).collect();
        format!("candidate record provider type: {}", names.join(", "))
    }
}

impl fmt::Display for CandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CandType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownSelector(s.to_string()))
    }
}
