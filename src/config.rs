//! Searcher configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::Strategy;

/// Default result cache capacity (number of entries).
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// How the memory strategy holds the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryBacking {
    /// Read the whole file into a heap buffer.
    #[default]
    Buffer,
    /// Memory-map the file.
    Mmap,
}

/// Configuration for a [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherConfig {
    /// Strategy used when a caller does not name one
    pub default_strategy: Strategy,
    /// Backing for the memory strategy
    pub memory_backing: MemoryBacking,
    /// Result cache capacity for [`CachedSearcher`](crate::CachedSearcher); 0 disables it
    pub cache_capacity: usize,
}

impl Default for SearcherConfig {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::Memory,
            memory_backing: MemoryBacking::Buffer,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl SearcherConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    pub fn with_backing(mut self, backing: MemoryBacking) -> Self {
        self.memory_backing = backing;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}
