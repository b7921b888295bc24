//! Flat ("binary") search: one positioned read per probe.

use crate::binary::{DatabaseSource, IndexEntry, SuperBlock, INDEX_BLOCK_LENGTH};
use crate::Result;

use super::{find_covering, require_pointer};

/// Resolve the raw data pointer for `ip`, reading each probed index
/// entry from `source`.
pub(crate) fn search<S>(source: &S, super_block: &SuperBlock, ip: u32) -> Result<u32>
where
    S: DatabaseSource + ?Sized,
{
    let found = find_covering(ip, super_block.total_blocks(), |i| {
        let block = source.read_at(super_block.entry_offset(i), INDEX_BLOCK_LENGTH)?;
        Ok(IndexEntry::read(&block, 0))
    })?;
    require_pointer(ip, found)
}
