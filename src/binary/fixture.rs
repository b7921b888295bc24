//! Small database files for tests.

use std::io::Write;

use super::format::*;
use crate::address::parse_ip;

#[derive(Clone)]
struct Range {
    start: u32,
    end: u32,
    city_id: u32,
    text: String,
}

/// Builds a valid database image from address ranges.
#[derive(Clone)]
pub(crate) struct DatabaseBuilder {
    ranges: Vec<Range>,
    header_stride: usize,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self {
            ranges: Vec::new(),
            header_stride: 4,
        }
    }

    /// Emit one header entry every `stride` index entries.
    pub fn header_stride(mut self, stride: usize) -> Self {
        assert!(stride > 0);
        self.header_stride = stride;
        self
    }

    pub fn range(mut self, start: &str, end: &str, city_id: u32, text: &str) -> Self {
        self.ranges.push(Range {
            start: parse_ip(start).unwrap(),
            end: parse_ip(end).unwrap(),
            city_id,
            text: text.to_string(),
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        assert!(!self.ranges.is_empty());
        let mut ranges: Vec<&Range> = self.ranges.iter().collect();
        ranges.sort_by_key(|r| r.start);

        let mut buf = vec![0u8; SUPER_BLOCK_SIZE + TOTAL_HEADER_LENGTH];

        let mut pointers = Vec::with_capacity(ranges.len());
        for range in &ranges {
            let offset = buf.len() as u32;
            buf.extend_from_slice(&range.city_id.to_le_bytes());
            buf.extend_from_slice(range.text.as_bytes());
            let length = u8::try_from(CITY_ID_LENGTH + range.text.len()).unwrap();
            pointers.push(PackedPointer { length, offset }.pack());
        }

        let first_index_ptr = buf.len() as u32;
        for (range, ptr) in ranges.iter().zip(&pointers) {
            buf.extend_from_slice(&range.start.to_le_bytes());
            buf.extend_from_slice(&range.end.to_le_bytes());
            buf.extend_from_slice(&ptr.to_le_bytes());
        }
        let last = ranges.len() - 1;
        let last_index_ptr = first_index_ptr + (last * INDEX_BLOCK_LENGTH) as u32;

        let mut header: Vec<usize> = (0..ranges.len()).step_by(self.header_stride).collect();
        if header.last() != Some(&last) {
            header.push(last);
        }
        assert!(header.len() <= MAX_HEADER_ENTRIES);
        for (slot, &i) in header.iter().enumerate() {
            let at = SUPER_BLOCK_SIZE + slot * HEADER_ENTRY_LENGTH;
            let index_ptr = first_index_ptr + (i * INDEX_BLOCK_LENGTH) as u32;
            buf[at..at + 4].copy_from_slice(&ranges[i].start.to_le_bytes());
            buf[at + 4..at + 8].copy_from_slice(&index_ptr.to_le_bytes());
        }

        buf[0..4].copy_from_slice(&first_index_ptr.to_le_bytes());
        buf[4..8].copy_from_slice(&last_index_ptr.to_le_bytes());
        buf
    }

    pub fn write_temp(&self) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}

/// Ten ranges with gaps around `10.0.0.0` and `172.16.0.0`.
pub(crate) fn sample_database() -> DatabaseBuilder {
    DatabaseBuilder::new()
        .header_stride(3)
        .range("1.0.0.0", "1.0.0.255", 1, "China|0|Fujian|Fuzhou|Telecom")
        .range("1.0.1.0", "1.0.3.255", 2, "China|0|Beijing|Beijing|ISP-X")
        .range("1.0.4.0", "1.255.255.255", 3, "Australia|0|Victoria|Melbourne|0")
        .range("2.0.0.0", "9.255.255.255", 4, "USA|West")
        .range("11.0.0.0", "100.63.255.255", 5, "Germany|0|Hesse|Frankfurt|DTAG")
        .range("100.64.0.0", "100.127.255.255", 6, "0|0|0|Shared|0")
        .range("100.128.0.0", "172.15.255.255", 7, "France|0|0|Paris|Orange")
        .range("172.32.0.0", "192.167.255.255", 8, "Japan|0|Tokyo|Tokyo|NTT")
        .range("192.168.0.0", "192.168.255.255", 9, "0|0|0|LAN|LAN")
        .range("192.169.0.0", "223.255.255.255", 10, "Brazil|0|SP|Sao Paulo|Vivo")
}
