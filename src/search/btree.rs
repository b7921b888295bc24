//! Two-level ("b-tree") search.
//!
//! The header table is a sparse sample of the index: each entry holds the
//! start address of one index entry and that entry's offset. Locating the
//! two samples around an address bounds the part of the index that can
//! contain it, which is then read with a single I/O.

use crate::binary::{
    read_u32_le, DatabaseSource, HeaderEntry, IndexEntry, HEADER_ENTRY_LENGTH, HEADER_OFFSET,
    INDEX_BLOCK_LENGTH, TOTAL_HEADER_LENGTH,
};
use crate::{Error, Result};

use super::{find_covering, require_pointer};

/// Header table loaded from the 8 KiB region after the super block.
#[derive(Debug, Clone, Default)]
pub struct HeaderTable {
    entries: Vec<HeaderEntry>,
}

impl HeaderTable {
    /// Read and decode the header region.
    pub fn load<S>(source: &S) -> Result<Self>
    where
        S: DatabaseSource + ?Sized,
    {
        let region = source.read_at(HEADER_OFFSET, TOTAL_HEADER_LENGTH)?;
        Ok(Self::parse(&region))
    }

    /// Decode header entries, stopping at the first zero index pointer.
    pub fn parse(region: &[u8]) -> Self {
        let entries = region
            .chunks_exact(HEADER_ENTRY_LENGTH)
            .map(|chunk| HeaderEntry {
                start_ip: read_u32_le(chunk, 0),
                index_ptr: read_u32_le(chunk, 4),
            })
            .take_while(|entry| entry.index_ptr != 0)
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    /// Find the `[start, end]` index offsets bounding the entry for `ip`.
    ///
    /// Both bounds are offsets of index entries; the entry at `end` is part
    /// of the range.
    pub fn locate(&self, ip: u32) -> Option<(u32, u32)> {
        let entries = &self.entries;
        let span = |a: usize, b: usize| Some((entries[a].index_ptr, entries[b].index_ptr));

        match entries.len() {
            0 => return None,
            1 => return span(0, 0),
            _ => {}
        }

        let last = entries.len() - 1;
        let (mut low, mut high) = (0usize, last);
        while low <= high {
            let mid = (low + high) / 2;
            let sip = entries[mid].start_ip;

            if ip == sip {
                return if mid > 0 { span(mid - 1, mid) } else { span(0, 1) };
            }

            if ip < sip {
                if mid == 0 {
                    return span(0, 1);
                }
                if ip > entries[mid - 1].start_ip {
                    return span(mid - 1, mid);
                }
                high = mid - 1;
            } else {
                if mid == last {
                    return span(mid - 1, mid);
                }
                if ip <= entries[mid + 1].start_ip {
                    return span(mid, mid + 1);
                }
                low = mid + 1;
            }
        }

        None
    }
}

/// Resolve the raw data pointer for `ip`.
pub(crate) fn search<S>(source: &S, table: &HeaderTable, ip: u32) -> Result<u32>
where
    S: DatabaseSource + ?Sized,
{
    let (sptr, eptr) = match table.locate(ip) {
        Some(range) => range,
        None => return require_pointer(ip, None),
    };

    if eptr < sptr {
        return Err(Error::CorruptData(format!(
            "header range [{}, {}] is inverted",
            sptr, eptr
        )));
    }

    let block_len = (eptr - sptr) as usize;
    let block = source.read_at(sptr as u64, block_len + INDEX_BLOCK_LENGTH)?;
    let count = block_len / INDEX_BLOCK_LENGTH + 1;

    let found = find_covering(ip, count, |i| {
        Ok(IndexEntry::read(&block, i * INDEX_BLOCK_LENGTH))
    })?;
    require_pointer(ip, found)
}
