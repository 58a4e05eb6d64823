//! Key Module
//!
//! Typed view of the composite keys stored in a capture index.
//!
//! ## Key Layout
//! ```text
//! ┌─────────┬──────────────────────────────────────────┐
//! │ Tag (1) │ Field (big-endian, width depends on tag) │
//! └─────────┴──────────────────────────────────────────┘
//! ```
//!
//! ### Tags
//! - 0x00: VERSION  - single-byte key holding the index version record
//! - 0x01: PROTOCOL - 1 byte IP protocol number
//! - 0x02: PORT     - 2 byte port
//! - 0x04: IPV4     - 4 byte address
//! - 0x06: IPV6     - 16 byte address
//!
//! The value stored under a metric key is a packed list of 4-byte packet
//! offsets, so the number of packets a key refers to is `value_len / 4`.

mod codec;

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

pub use codec::{decode_key, weight_for};

/// Width in bytes of one packet offset inside a value
pub const PACKET_REF_WIDTH: usize = 4;

/// Key under which every index file stores its version record
pub const VERSION_KEY: &[u8] = &[0];

/// Major version of the index layout this crate understands
pub const MAJOR_VERSION: u32 = 2;

/// Leading type tag of a metric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyTag {
    Protocol = 0x01,
    Port = 0x02,
    Ipv4 = 0x04,
    Ipv6 = 0x06,
}

impl KeyTag {
    /// Map a raw tag byte to a known metric tag
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(KeyTag::Protocol),
            0x02 => Some(KeyTag::Port),
            0x04 => Some(KeyTag::Ipv4),
            0x06 => Some(KeyTag::Ipv6),
            _ => None,
        }
    }

    /// Width of the field that follows the tag byte
    pub fn field_width(self) -> usize {
        match self {
            KeyTag::Protocol => 1,
            KeyTag::Port => 2,
            KeyTag::Ipv4 => 4,
            KeyTag::Ipv6 => 16,
        }
    }
}

/// A decoded metric value, one variant per key category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Protocol(u8),
    Port(u16),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl Metric {
    /// The key tag this metric was decoded from
    pub fn tag(&self) -> KeyTag {
        match self {
            Metric::Protocol(_) => KeyTag::Protocol,
            Metric::Port(_) => KeyTag::Port,
            Metric::Ipv4(_) => KeyTag::Ipv4,
            Metric::Ipv6(_) => KeyTag::Ipv6,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Protocol(p) => write!(f, "{}", p),
            Metric::Port(p) => write!(f, "{}", p),
            Metric::Ipv4(addr) => write!(f, "{}", addr),
            Metric::Ipv6(addr) => write!(f, "{}", addr),
        }
    }
}

/// A metric together with the number of packets its key references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedMetric {
    pub metric: Metric,
    pub weight: u64,
}
