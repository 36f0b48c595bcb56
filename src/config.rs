//! Environment-driven configuration for the candidate server
//!
//! | Variable         | Default   |
//! |------------------|-----------|
//! | `CAND_PROVIDER`  | `qrels`   |
//! | `QRELS_PATH`     | (none)    |
//! | `MIN_REL_LEVEL`  | `1`       |
//! | `CANDPROV_HOST`  | `0.0.0.0` |
//! | `CANDPROV_PORT`  | `8081`    |

use crate::cand_type::CandType;
use crate::registry::ProviderConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub cand_type: CandType,
    pub qrels_path: Option<PathBuf>,
    pub min_rel_level: i32,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cand_type = match lookup("CAND_PROVIDER") {
            Some(s) => s
                .parse::<CandType>()
                .with_context(|| format!("invalid CAND_PROVIDER ({})", CandType::description()))?,
            None => CandType::Qrels,
        };

        let min_rel_level = match lookup("MIN_REL_LEVEL") {
            Some(s) => s
                .parse()
                .with_context(|| format!("MIN_REL_LEVEL must be an integer, got '{}'", s))?,
            None => 1,
        };

        let port = match lookup("CANDPROV_PORT") {
            Some(s) => s
                .parse()
                .with_context(|| format!("CANDPROV_PORT must be a port number, got '{}'", s))?,
            None => 8081,
        };

        Ok(Self {
            cand_type,
            qrels_path: lookup("QRELS_PATH").map(PathBuf::from),
            min_rel_level,
            host: lookup("CANDPROV_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            qrels_path: self.qrels_path.clone(),
            min_rel_level: self.min_rel_level,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
