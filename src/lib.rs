//! ipregion - IPv4 to region/ISP lookups over ip2region database files.
//!
//! The database is a static, sorted, range-indexed binary file. This crate
//! only reads it: no writes, no mutation.
//!
//! # Features
//!
//! - **Three lookup strategies** over the same file:
//!   - `b-tree`: header table pre-narrows the index, one read per query
//!   - `binary`: binary search with one positioned read per probe
//!   - `memory`: binary search over the file loaded once into memory
//! - **Identical results** from every strategy
//! - **Thread-safe handle**: lazily built caches, serialized file reads
//! - **Optional result cache** via [`CachedSearcher`]
//!
//! # Quick Start
//!
//! ```ignore
//! use ipregion::{Searcher, Strategy};
//!
//! let searcher = Searcher::open("ip2region.db")?;
//!
//! let record = searcher.lookup("223.5.5.5", Strategy::Memory)?;
//! println!("{} {} {}", record.country, record.city, record.isp);
//!
//! // Strategy names as accepted from user input
//! let strategy: Strategy = "b-tree".parse()?;
//! let same = searcher.lookup("223.5.5.5", strategy)?;
//! assert_eq!(record, same);
//!
//! searcher.close();
//! ```
//!
//! # Errors
//!
//! Every failure is returned as an [`Error`]; nothing is retried. An
//! address outside every indexed range yields [`Error::NotFound`].

mod address;
mod cached;
mod config;
mod error;
mod record;
mod searcher;
mod strategy;

pub mod binary;
pub mod search;

// Re-export core types
pub use address::{format_ip, parse_ip};
pub use error::{Error, Result};
pub use record::{decode_record, GeoRecord};
pub use strategy::Strategy;

// Re-export the database handle and configuration
pub use cached::{CacheStats, CachedSearcher};
pub use config::{MemoryBacking, SearcherConfig, DEFAULT_CACHE_CAPACITY};
pub use searcher::Searcher;
