//! Memory search: the flat search over a fully loaded file.

use crate::binary::{IndexEntry, SuperBlock};
use crate::Result;

use super::{find_covering, require_pointer};

/// Resolve the raw data pointer for `ip` within `data`.
///
/// `super_block` must already be validated against `data.len()`, which
/// keeps every probe in bounds.
pub(crate) fn search(data: &[u8], super_block: &SuperBlock, ip: u32) -> Result<u32> {
    let found = find_covering(ip, super_block.total_blocks(), |i| {
        Ok(IndexEntry::read(data, super_block.entry_offset(i) as usize))
    })?;
    require_pointer(ip, found)
}
