//! Index search strategies.
//!
//! The three strategies share one covering-range binary search
//! ([`find_covering`]) and one record decoder ([`resolve_record`]); they
//! differ only in where index entries come from:
//!
//! - [`btree`]: a header table narrows the index to a short sub-range,
//!   which is read in one go and searched in memory.
//! - [`binary`]: every probe is a positioned 12-byte read from the file.
//! - [`memory`]: every probe is a slice of the fully loaded file.

pub(crate) mod binary;
pub(crate) mod btree;
pub(crate) mod memory;

pub use btree::HeaderTable;

use crate::address::format_ip;
use crate::binary::{read_u32_le, DatabaseSource, IndexEntry, PackedPointer, CITY_ID_LENGTH};
use crate::record::{decode_record, GeoRecord};
use crate::{Error, Result};

/// Binary search `count` sorted, non-overlapping ranges for one covering
/// `ip`. Returns the entry's raw data pointer.
pub(crate) fn find_covering<F>(ip: u32, count: usize, mut fetch: F) -> Result<Option<u32>>
where
    F: FnMut(usize) -> Result<IndexEntry>,
{
    let (mut low, mut high) = (0usize, count);
    while low < high {
        let mid = low + (high - low) / 2;
        let entry = fetch(mid)?;
        if ip < entry.start_ip {
            high = mid;
        } else if ip > entry.end_ip {
            low = mid + 1;
        } else {
            return Ok(Some(entry.data_ptr));
        }
    }
    Ok(None)
}

/// Map a search outcome to a non-zero data pointer.
pub(crate) fn require_pointer(ip: u32, found: Option<u32>) -> Result<u32> {
    match found {
        Some(ptr) if ptr != 0 => Ok(ptr),
        _ => Err(Error::NotFound(format_ip(ip))),
    }
}

/// Decode the record a packed data pointer refers to.
pub(crate) fn resolve_record<S>(source: &S, raw_ptr: u32) -> Result<GeoRecord>
where
    S: DatabaseSource + ?Sized,
{
    if raw_ptr == 0 {
        return Err(Error::NotFound("null data pointer".to_string()));
    }

    let ptr = PackedPointer::unpack(raw_ptr);
    if (ptr.length as usize) < CITY_ID_LENGTH {
        return Err(Error::CorruptData(format!(
            "record at {} has length {} shorter than its city id",
            ptr.offset, ptr.length
        )));
    }
    if ptr.end() > source.total_size() {
        return Err(Error::CorruptData(format!(
            "record at {} with length {} exceeds file size {}",
            ptr.offset,
            ptr.length,
            source.total_size()
        )));
    }

    let data = source.read_at(ptr.offset as u64, ptr.length as usize)?;
    let city_id = read_u32_le(&data, 0) as i64;
    Ok(decode_record(city_id, &data[CITY_ID_LENGTH..]))
}
