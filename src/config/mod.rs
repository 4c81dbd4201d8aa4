use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub corpus: CorpusConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Root directory that is walked for .docx recipe documents.
    pub root: PathBuf,
    /// Number of documents parsed concurrently during a load pass.
    pub concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directory holding the tantivy index and the fingerprint cache file.
    pub index_path: PathBuf,
    pub default_limit: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let root = std::env::var("RECIPES_PATH")
            .unwrap_or_else(|_| "./Recipes".to_string())
            .into();

        let concurrency = std::env::var("PARSE_CONCURRENCY")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PARSE_CONCURRENCY value".to_string()))?;

        let index_path = std::env::var("INDEX_PATH")
            .unwrap_or_else(|_| "./search_idx".to_string())
            .into();

        let default_limit = std::env::var("SEARCH_LIMIT")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_LIMIT value".to_string()))?;

        Ok(Settings {
            corpus: CorpusConfig { root, concurrency },
            search: SearchConfig {
                index_path,
                default_limit,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.corpus.concurrency == 0 {
            return Err(Error::Config(
                "Parse concurrency must be non-zero".to_string(),
            ));
        }

        if self.search.default_limit == 0 {
            return Err(Error::Config("Search limit must be non-zero".to_string()));
        }

        Ok(())
    }

    /// Path of the fingerprint cache file inside the index directory
    pub fn cache_path(&self) -> PathBuf {
        self.search.index_path.join("item.idx")
    }

    /// Path of the tantivy index directory
    pub fn tantivy_path(&self) -> PathBuf {
        self.search.index_path.join("tantivy")
    }
}
