//! Key codec
//!
//! Decoding of raw index keys into typed metrics.
//!
//! Every field read is bounds-checked: a key that is shorter than its tag
//! requires yields `CapIndexError::MalformedKey` instead of a panic, and the
//! scanner skips that one record.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{CapIndexError, Result};

use super::{DecodedMetric, KeyTag, Metric, PACKET_REF_WIDTH};

/// Number of packets referenced by a value of `value_len` bytes
///
/// Truncating division: a trailing partial offset does not count.
pub fn weight_for(value_len: usize) -> u64 {
    (value_len / PACKET_REF_WIDTH) as u64
}

/// Decode a raw key and the length of its value
///
/// Returns:
/// - `Ok(Some(metric))` — a recognized metric key
/// - `Ok(None)` — empty key or unknown tag (including the version record)
/// - `Err(MalformedKey)` — recognized tag but too few field bytes
pub fn decode_key(key: &[u8], value_len: usize) -> Result<Option<DecodedMetric>> {
    let (&tag_byte, field) = match key.split_first() {
        Some(parts) => parts,
        None => return Ok(None),
    };

    let tag = match KeyTag::from_byte(tag_byte) {
        Some(tag) => tag,
        None => return Ok(None),
    };

    let width = tag.field_width();
    let field = field.get(..width).ok_or(CapIndexError::MalformedKey {
        tag: tag_byte,
        expected: 1 + width,
        actual: key.len(),
    })?;

    let metric = match tag {
        KeyTag::Protocol => Metric::Protocol(field[0]),
        KeyTag::Port => Metric::Port(u16::from_be_bytes([field[0], field[1]])),
        KeyTag::Ipv4 => Metric::Ipv4(Ipv4Addr::new(field[0], field[1], field[2], field[3])),
        KeyTag::Ipv6 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(field);
            Metric::Ipv6(Ipv6Addr::from(octets))
        }
    };

    Ok(Some(DecodedMetric {
        metric,
        weight: weight_for(value_len),
    }))
}
