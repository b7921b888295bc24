//! Cached searcher.
//!
//! Wraps a [`Searcher`] with a concurrent cache of lookup results, keyed
//! by strategy and address. Only successful lookups are cached.

use quick_cache::sync::Cache;
use std::path::Path;

use crate::address::parse_ip;
use crate::config::SearcherConfig;
use crate::record::GeoRecord;
use crate::searcher::Searcher;
use crate::{Error, Result, Strategy};

type CacheKey = (Strategy, u32);

/// Searcher with a result cache.
///
/// # Example
///
/// ```ignore
/// use ipregion::CachedSearcher;
///
/// let searcher = CachedSearcher::open("ip2region.db")?;
/// let record = searcher.lookup_default("1.2.3.4")?;
/// let again = searcher.lookup_default("1.2.3.4")?; // served from cache
/// ```
pub struct CachedSearcher {
    inner: Searcher,
    cache: Option<Cache<CacheKey, GeoRecord>>,
    capacity: usize,
}

impl CachedSearcher {
    /// Open a database with default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, SearcherConfig::default())
    }

    /// Open a database with custom configuration.
    pub fn open_with_config(path: impl AsRef<Path>, config: SearcherConfig) -> Result<Self> {
        Ok(Self::new(Searcher::open_with_config(path, config)?))
    }

    /// Wrap an open searcher, sized by its `cache_capacity`.
    pub fn new(inner: Searcher) -> Self {
        let capacity = inner.config().cache_capacity;
        let cache = if capacity > 0 {
            Some(Cache::new(capacity))
        } else {
            None
        };

        Self {
            inner,
            cache,
            capacity,
        }
    }

    /// Look up an address, consulting the cache first.
    pub fn lookup(&self, ip: &str, strategy: Strategy) -> Result<GeoRecord> {
        let key = parse_ip(ip)?;
        self.search_ip(key, strategy)
    }

    /// Look up an address with the configured default strategy.
    pub fn lookup_default(&self, ip: &str) -> Result<GeoRecord> {
        self.lookup(ip, self.inner.config().default_strategy)
    }

    /// Look up an already parsed address key.
    pub fn search_ip(&self, ip: u32, strategy: Strategy) -> Result<GeoRecord> {
        let cache = match self.cache {
            Some(ref cache) => cache,
            None => return self.inner.search_ip(ip, strategy),
        };

        // Closed handles must fail even for cached addresses.
        if self.inner.is_closed() {
            return Err(Error::Closed);
        }

        if let Some(record) = cache.get(&(strategy, ip)) {
            return Ok(record);
        }

        let record = self.inner.search_ip(ip, strategy)?;
        cache.insert((strategy, ip), record.clone());
        Ok(record)
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear();
        }
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        match self.cache {
            Some(ref cache) => CacheStats {
                capacity: self.capacity,
                len: cache.len(),
                enabled: true,
            },
            None => CacheStats::default(),
        }
    }

    /// Close the underlying database and drop cached results.
    pub fn close(&self) {
        self.inner.close();
        self.clear_cache();
    }

    /// Get a reference to the underlying searcher.
    pub fn inner(&self) -> &Searcher {
        &self.inner
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Maximum cache capacity.
    pub capacity: usize,
    /// Current number of entries in the cache.
    pub len: usize,
    /// Whether caching is enabled.
    pub enabled: bool,
}
