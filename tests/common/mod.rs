//! Shared helpers for integration tests.

#![allow(dead_code)]

use ipregion::binary::{
    PackedPointer, HEADER_ENTRY_LENGTH, INDEX_BLOCK_LENGTH, SUPER_BLOCK_SIZE, TOTAL_HEADER_LENGTH,
};
use std::io::Write;

/// One address range and its record.
#[derive(Debug, Clone)]
pub struct Range {
    pub start: u32,
    pub end: u32,
    pub city_id: u32,
    pub text: String,
}

/// Write a database image for `ranges` (sorted by start, non-overlapping),
/// sampling a header entry every `stride` index entries.
pub fn build_database(ranges: &[Range], stride: usize) -> Vec<u8> {
    let mut buf = vec![0u8; SUPER_BLOCK_SIZE + TOTAL_HEADER_LENGTH];

    let mut pointers = Vec::with_capacity(ranges.len());
    for range in ranges {
        let offset = buf.len() as u32;
        buf.extend_from_slice(&range.city_id.to_le_bytes());
        buf.extend_from_slice(range.text.as_bytes());
        let length = u8::try_from(4 + range.text.len()).expect("record too long");
        pointers.push(PackedPointer { length, offset }.pack());
    }

    let first = buf.len();
    for (range, ptr) in ranges.iter().zip(&pointers) {
        buf.extend_from_slice(&range.start.to_le_bytes());
        buf.extend_from_slice(&range.end.to_le_bytes());
        buf.extend_from_slice(&ptr.to_le_bytes());
    }
    let last = ranges.len() - 1;

    let mut samples: Vec<usize> = (0..ranges.len()).step_by(stride).collect();
    if samples.last() != Some(&last) {
        samples.push(last);
    }
    for (slot, &i) in samples.iter().enumerate() {
        let at = SUPER_BLOCK_SIZE + slot * HEADER_ENTRY_LENGTH;
        let index_ptr = (first + i * INDEX_BLOCK_LENGTH) as u32;
        buf[at..at + 4].copy_from_slice(&ranges[i].start.to_le_bytes());
        buf[at + 4..at + 8].copy_from_slice(&index_ptr.to_le_bytes());
    }

    buf[0..4].copy_from_slice(&(first as u32).to_le_bytes());
    buf[4..8].copy_from_slice(&((first + last * INDEX_BLOCK_LENGTH) as u32).to_le_bytes());
    buf
}

pub fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

/// `count` ranges of `width` addresses each, separated by `gap` uncovered
/// addresses, starting at `base`.
pub fn generate_ranges(base: u32, count: u32, width: u32, gap: u32) -> Vec<Range> {
    (0..count)
        .map(|i| {
            let start = base + i * (width + gap);
            Range {
                start,
                end: start + width - 1,
                city_id: i + 1,
                text: format!("Country{}|0|Province{}|City{}|ISP{}", i % 7, i % 31, i, i % 5),
            }
        })
        .collect()
}

/// A database that covers the whole address space in `/8` blocks.
pub fn full_coverage() -> Vec<Range> {
    (0..256u32)
        .map(|i| Range {
            start: i << 24,
            end: (i << 24) | 0x00FF_FFFF,
            city_id: i,
            text: if i % 2 == 0 {
                format!("China|0|Province{}|City{}|Telecom", i, i)
            } else {
                "USA|West".to_string()
            },
        })
        .collect()
}
