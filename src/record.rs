//! Decoded region records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Region information for an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeoRecord {
    pub city_id: i64,
    pub country: String,
    pub region: String,
    pub province: String,
    pub city: String,
    pub isp: String,
}

impl fmt::Display for GeoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}",
            self.city_id, self.country, self.region, self.province, self.city, self.isp
        )
    }
}

/// Split a pipe-delimited record body into a `GeoRecord`.
///
/// Missing trailing fields become empty strings and fields past the fifth
/// are dropped. Invalid UTF-8 is replaced rather than rejected, so this
/// never fails.
pub fn decode_record(city_id: i64, text: &[u8]) -> GeoRecord {
    let text = String::from_utf8_lossy(text);
    let mut fields = text.split('|').map(str::to_string);
    let mut next = || fields.next().unwrap_or_default();

    GeoRecord {
        city_id,
        country: next(),
        region: next(),
        province: next(),
        city: next(),
        isp: next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let record = decode_record(1, b"China|0|Beijing|Beijing|ISP-X");
        assert_eq!(
            record,
            GeoRecord {
                city_id: 1,
                country: "China".to_string(),
                region: "0".to_string(),
                province: "Beijing".to_string(),
                city: "Beijing".to_string(),
                isp: "ISP-X".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_pads_missing_fields() {
        let record = decode_record(7, b"USA|West");
        assert_eq!(record.country, "USA");
        assert_eq!(record.region, "West");
        assert_eq!(record.province, "");
        assert_eq!(record.city, "");
        assert_eq!(record.isp, "");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let record = decode_record(0, b"a|b|c|d|e|f|g");
        assert_eq!(record.isp, "e");
    }

    #[test]
    fn test_decode_empty_and_invalid_utf8() {
        let record = decode_record(0, b"");
        assert_eq!(record, GeoRecord::default());

        let record = decode_record(3, &[0xFF, b'|', b'x']);
        assert_eq!(record.region, "x");
        assert_eq!(record.country, "\u{FFFD}");
    }

    #[test]
    fn test_display() {
        let record = decode_record(42, b"China|0|Guangdong|Shenzhen|Telecom");
        assert_eq!(record.to_string(), "42|China|0|Guangdong|Shenzhen|Telecom");
    }
}
