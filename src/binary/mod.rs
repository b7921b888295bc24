//! ip2region binary database format.
//!
//! The file is a fixed super block and header table followed by record
//! data and a sorted index of address ranges. All integers are
//! little-endian `u32`.
//!
//! # File Structure
//!
//! ```text
//! +------------------+
//! |   SUPER BLOCK    |  8 bytes: first index ptr, last index ptr
//! +------------------+
//! |   HEADER TABLE   |  8192 bytes: up to 1024 (start ip, index ptr)
//! +------------------+
//! |     RECORDS      |  variable: city id (4 bytes) + "a|b|c|d|e"
//! +------------------+
//! |      INDEX       |  12 bytes per entry: start ip, end ip, packed ptr
//! +------------------+
//! ```
//!
//! A packed pointer carries the record length in its top byte and the
//! record offset in the low 24 bits.

mod format;
mod source;

#[cfg(test)]
pub(crate) mod fixture;


pub use format::*;
pub use source::{DatabaseSource, FileSource, MemorySource};
