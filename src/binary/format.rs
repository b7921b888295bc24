//! Binary format constants and structures.

use crate::{Error, Result};

/// Size of the super block at the start of the file.
pub const SUPER_BLOCK_SIZE: usize = 8;

/// Offset of the header region.
pub const HEADER_OFFSET: u64 = SUPER_BLOCK_SIZE as u64;

/// Size of the header region in bytes (8 KiB).
pub const TOTAL_HEADER_LENGTH: usize = 8192;

/// Size of one header entry.
pub const HEADER_ENTRY_LENGTH: usize = 8;

/// Maximum number of header entries.
pub const MAX_HEADER_ENTRIES: usize = TOTAL_HEADER_LENGTH / HEADER_ENTRY_LENGTH;

/// Size of one index entry.
pub const INDEX_BLOCK_LENGTH: usize = 12;

/// Length of the city id prefix of every record.
pub const CITY_ID_LENGTH: usize = 4;

/// Read a little-endian `u32` at `offset`.
///
/// # Panics
///
/// Panics if `offset + 4 > buf.len()`. Offsets derived from file contents
/// must be bounds-checked before calling this.
#[inline]
pub fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// File super block (8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    /// Offset of the first index entry
    pub first_index_ptr: u32,
    /// Offset of the last index entry
    pub last_index_ptr: u32,
}

impl SuperBlock {
    /// Decode the super block from the first 8 bytes of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < SUPER_BLOCK_SIZE {
            return Err(Error::CorruptData(format!(
                "super block truncated: {} bytes",
                buf.len()
            )));
        }
        Ok(Self {
            first_index_ptr: read_u32_le(buf, 0),
            last_index_ptr: read_u32_le(buf, 4),
        })
    }

    /// Check that the index region lies inside a file of `file_size` bytes.
    pub fn validate(&self, file_size: u64) -> Result<()> {
        if self.last_index_ptr < self.first_index_ptr {
            return Err(Error::CorruptData(format!(
                "last index pointer {} precedes first index pointer {}",
                self.last_index_ptr, self.first_index_ptr
            )));
        }
        let index_end = self.last_index_ptr as u64 + INDEX_BLOCK_LENGTH as u64;
        if index_end > file_size {
            return Err(Error::CorruptData(format!(
                "index region ends at {} but file is {} bytes",
                index_end, file_size
            )));
        }
        Ok(())
    }

    /// Number of index entries.
    pub fn total_blocks(&self) -> usize {
        (self.last_index_ptr - self.first_index_ptr) as usize / INDEX_BLOCK_LENGTH + 1
    }

    /// Absolute file offset of index entry `i`.
    pub fn entry_offset(&self, i: usize) -> u64 {
        self.first_index_ptr as u64 + (i * INDEX_BLOCK_LENGTH) as u64
    }
}

/// Index entry (12 bytes): an inclusive address range and its record pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub start_ip: u32,
    pub end_ip: u32,
    /// Packed record pointer
    pub data_ptr: u32,
}

impl IndexEntry {
    /// Decode the entry at `offset` within `buf`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than 12 bytes are available at `offset`.
    #[inline]
    pub fn read(buf: &[u8], offset: usize) -> Self {
        Self {
            start_ip: read_u32_le(buf, offset),
            end_ip: read_u32_le(buf, offset + 4),
            data_ptr: read_u32_le(buf, offset + 8),
        }
    }

    /// Whether `ip` falls inside this entry's range (both ends inclusive).
    pub fn contains(&self, ip: u32) -> bool {
        self.start_ip <= ip && ip <= self.end_ip
    }
}

/// Header entry (8 bytes). `index_ptr` points into the index region, not
/// at record data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderEntry {
    pub start_ip: u32,
    pub index_ptr: u32,
}

/// Record pointer packing a byte length (top 8 bits) and a file offset
/// (low 24 bits). The length includes the 4-byte city id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedPointer {
    pub length: u8,
    pub offset: u32,
}

impl PackedPointer {
    /// Largest offset representable in 24 bits.
    pub const MAX_OFFSET: u32 = 0x00FF_FFFF;

    pub fn unpack(raw: u32) -> Self {
        Self {
            length: ((raw >> 24) & 0xFF) as u8,
            offset: raw & Self::MAX_OFFSET,
        }
    }

    pub fn pack(self) -> u32 {
        ((self.length as u32) << 24) | (self.offset & Self::MAX_OFFSET)
    }

    /// End offset (exclusive) of the record.
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.length as u64
    }
}
