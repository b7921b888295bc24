//! Dotted-quad IPv4 address parsing.
//!
//! Addresses are keyed as host-order `u32` values, the same ordering the
//! database index is sorted by.

use std::net::Ipv4Addr;

use crate::{Error, Result};

/// Parse a dotted-quad IPv4 address into its `u32` key.
///
/// Exactly four `.`-separated decimal components in `[0, 255]` are
/// required. Surrounding whitespace of the whole text is ignored.
///
/// # Examples
/// ```
/// assert_eq!(ipregion::parse_ip("1.2.3.4").unwrap(), 0x01020304);
/// assert!(ipregion::parse_ip("1.2.3").is_err());
/// ```
pub fn parse_ip(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.len() != 4 {
        return Err(Error::InvalidIpAddress(format!(
            "{} (expected 4 components, got {})",
            trimmed,
            parts.len()
        )));
    }

    let mut key = 0u32;
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidIpAddress(trimmed.to_string()));
        }
        let octet: u8 = part
            .parse()
            .map_err(|_| Error::InvalidIpAddress(trimmed.to_string()))?;
        key = (key << 8) | octet as u32;
    }

    Ok(key)
}

/// Format a `u32` key back into dotted-quad notation.
pub fn format_ip(key: u32) -> String {
    Ipv4Addr::from(key).to_string()
}
