//! Database handle.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::address::parse_ip;
use crate::binary::{DatabaseSource, FileSource, MemorySource, SuperBlock, SUPER_BLOCK_SIZE};
use crate::config::SearcherConfig;
use crate::record::GeoRecord;
use crate::search::{self, resolve_record, HeaderTable};
use crate::{Error, Result, Strategy};

/// An open ip2region database.
///
/// The file handle is opened up front. The header table, the super block
/// and the in-memory copy of the file are each built on first use and
/// kept for the lifetime of the handle; a failed build is not cached, so
/// the next query retries it.
///
/// `Searcher` is `Send + Sync`. File reads are serialized internally, so a
/// shared handle can serve several threads.
///
/// # Example
///
/// ```ignore
/// use ipregion::{Searcher, Strategy};
///
/// let searcher = Searcher::open("ip2region.db")?;
/// let record = searcher.lookup("1.2.3.4", Strategy::BTree)?;
/// println!("{}", record);
/// searcher.close();
/// ```
pub struct Searcher {
    path: PathBuf,
    config: SearcherConfig,
    file: FileSource,
    header_table: OnceCell<HeaderTable>,
    super_block: OnceCell<SuperBlock>,
    memory: OnceCell<MemorySource>,
    memory_loads: AtomicUsize,
    closed: AtomicBool,
}

impl Searcher {
    /// Open a database file with default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, SearcherConfig::default())
    }

    /// Open a database file with custom configuration.
    pub fn open_with_config(path: impl AsRef<Path>, config: SearcherConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = FileSource::open(path)?;
        log::info!("Opened {:?} ({} bytes)", path, file.total_size());

        Ok(Self {
            path: path.to_path_buf(),
            config,
            file,
            header_table: OnceCell::new(),
            super_block: OnceCell::new(),
            memory: OnceCell::new(),
            memory_loads: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        })
    }

    /// Close the database. Every later query fails with [`Error::Closed`].
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.file.close();
            log::info!("Closed {:?}", self.path);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &SearcherConfig {
        &self.config
    }

    /// Number of times the file has been loaded for the memory strategy.
    pub fn memory_load_count(&self) -> usize {
        self.memory_loads.load(Ordering::SeqCst)
    }

    /// Look up an address with the given strategy.
    pub fn lookup(&self, ip: &str, strategy: Strategy) -> Result<GeoRecord> {
        let key = parse_ip(ip)?;
        self.search_ip(key, strategy)
    }

    /// Look up an address with the configured default strategy.
    pub fn lookup_default(&self, ip: &str) -> Result<GeoRecord> {
        self.lookup(ip, self.config.default_strategy)
    }

    pub fn btree_search(&self, ip: &str) -> Result<GeoRecord> {
        self.lookup(ip, Strategy::BTree)
    }

    pub fn binary_search(&self, ip: &str) -> Result<GeoRecord> {
        self.lookup(ip, Strategy::Binary)
    }

    pub fn memory_search(&self, ip: &str) -> Result<GeoRecord> {
        self.lookup(ip, Strategy::Memory)
    }

    /// Look up an already parsed address key.
    pub fn search_ip(&self, ip: u32, strategy: Strategy) -> Result<GeoRecord> {
        self.ensure_open()?;

        match strategy {
            Strategy::BTree => {
                let table = self.header_table()?;
                let ptr = search::btree::search(&self.file, table, ip)?;
                resolve_record(&self.file, ptr)
            }
            Strategy::Binary => {
                let super_block = self.super_block(&self.file)?;
                let ptr = search::binary::search(&self.file, super_block, ip)?;
                resolve_record(&self.file, ptr)
            }
            Strategy::Memory => {
                let memory = self.memory()?;
                let super_block = self.super_block(memory)?;
                super_block.validate(memory.total_size())?;
                let ptr = search::memory::search(memory.as_bytes(), super_block, ip)?;
                resolve_record(memory, ptr)
            }
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        Ok(())
    }

    fn header_table(&self) -> Result<&HeaderTable> {
        self.header_table.get_or_try_init(|| {
            let table = HeaderTable::load(&self.file)?;
            log::debug!("Loaded header table: {} entries", table.len());
            Ok(table)
        })
    }

    /// The super block is the same whichever source reads it first.
    fn super_block<S>(&self, source: &S) -> Result<&SuperBlock>
    where
        S: DatabaseSource + ?Sized,
    {
        self.super_block.get_or_try_init(|| {
            let bytes = source.read_at(0, SUPER_BLOCK_SIZE)?;
            let super_block = SuperBlock::parse(&bytes)?;
            super_block.validate(source.total_size())?;
            log::debug!(
                "Loaded super block: index [{}, {}], {} blocks",
                super_block.first_index_ptr,
                super_block.last_index_ptr,
                super_block.total_blocks()
            );
            Ok(super_block)
        })
    }

    fn memory(&self) -> Result<&MemorySource> {
        self.memory.get_or_try_init(|| {
            let memory = MemorySource::load(&self.path, self.config.memory_backing)?;
            if memory.total_size() != self.file.total_size() {
                return Err(Error::CorruptData(format!(
                    "{:?} is {} bytes on disk but {} bytes when opened",
                    self.path,
                    memory.total_size(),
                    self.file.total_size()
                )));
            }
            self.memory_loads.fetch_add(1, Ordering::SeqCst);
            log::debug!(
                "Loaded {:?} into memory ({} bytes, {:?})",
                self.path,
                memory.total_size(),
                self.config.memory_backing
            );
            Ok(memory)
        })
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}
