//! Byte-addressable access to a database file.
//!
//! Every read is an explicit `(offset, length)` pair, so no caller depends
//! on a shared cursor position.

use memmap2::Mmap;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::format::read_u32_le;
use crate::config::MemoryBacking;
use crate::{Error, Result};

/// Read-only random access to the bytes of a database file.
pub trait DatabaseSource {
    /// Read `len` bytes starting at `offset`.
    fn read_at(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>>;

    /// Read a little-endian `u32` at `offset`.
    fn read_u32_at(&self, offset: u64) -> Result<u32> {
        let bytes = self.read_at(offset, 4)?;
        Ok(read_u32_le(&bytes, 0))
    }

    /// Total size of the file in bytes.
    fn total_size(&self) -> u64;
}

fn check_bounds(offset: u64, len: usize, total: u64) -> Result<()> {
    match offset.checked_add(len as u64) {
        Some(end) if end <= total => Ok(()),
        _ => Err(Error::CorruptData(format!(
            "read of {} bytes at offset {} exceeds file size {}",
            len, offset, total
        ))),
    }
}

/// File-handle backed source. Each read seeks and reads under one lock.
pub struct FileSource {
    file: Mutex<Option<File>>,
    size: u64,
}

impl FileSource {
    /// Open a database file.
    pub fn open(path: &Path) -> Result<Self> {
        let open_err = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_err)?;
        let size = file.metadata().map_err(open_err)?.len();

        Ok(Self {
            file: Mutex::new(Some(file)),
            size,
        })
    }

    /// Drop the file handle. Later reads fail with [`Error::Closed`].
    pub fn close(&self) {
        self.file.lock().take();
    }

    pub fn is_closed(&self) -> bool {
        self.file.lock().is_none()
    }
}

impl DatabaseSource for FileSource {
    fn read_at(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        let mut guard = self.file.lock();
        let file = guard.as_mut().ok_or(Error::Closed)?;
        check_bounds(offset, len, self.size)?;
        file.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::CorruptData(format!(
                "short read of {} bytes at offset {}",
                len, offset
            )),
            _ => Error::Io(e),
        })?;

        Ok(Cow::Owned(buf))
    }

    fn total_size(&self) -> u64 {
        self.size
    }
}

enum Backing {
    Buffer(Vec<u8>),
    Mapped(Mmap),
}

/// Whole-file source. Reads are slices of the loaded bytes.
pub struct MemorySource {
    backing: Backing,
}

impl MemorySource {
    /// Load the whole file at `path`.
    pub fn load(path: &Path, backing: MemoryBacking) -> Result<Self> {
        let open_err = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };
        let backing = match backing {
            MemoryBacking::Buffer => Backing::Buffer(std::fs::read(path).map_err(open_err)?),
            MemoryBacking::Mmap => {
                let file = File::open(path).map_err(open_err)?;
                // The database is treated as immutable while mapped.
                let mmap = unsafe { Mmap::map(&file).map_err(open_err)? };
                Backing::Mapped(mmap)
            }
        };
        Ok(Self { backing })
    }

    /// Wrap bytes already in memory.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            backing: Backing::Buffer(data),
        }
    }

    /// The loaded file contents.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Buffer(data) => data.as_slice(),
            Backing::Mapped(mmap) => &mmap[..],
        }
    }

    /// Whether the bytes come from a memory map.
    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }
}

impl DatabaseSource for MemorySource {
    fn read_at(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        let data = self.as_bytes();
        check_bounds(offset, len, data.len() as u64)?;
        let start = offset as usize;
        Ok(Cow::Borrowed(&data[start..start + len]))
    }

    fn total_size(&self) -> u64 {
        self.as_bytes().len() as u64
    }
}
