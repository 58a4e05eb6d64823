//! Summary rendering
//!
//! ## Output Shape
//! ```text
//! {"totalSize":3072,
//!  "protocols":{"6":25,"17":5},
//!  "ports":{"80":125,"443":50},
//!  "ipv4":{"192.168.1.1":25},
//!  "ipv6":{"::1":50}}
//! ```
//! (emitted on a single line)
//!
//! Sections are ordered by numeric value: protocols and ports ascending,
//! IPv4 by 32-bit value, IPv6 by 128-bit value. `BTreeMap` ordering over
//! `Ipv4Addr`/`Ipv6Addr` is exactly that binary order.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::Result;

/// Immutable, sorted copy of an aggregator's state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub total_size: u64,
    pub protocols: BTreeMap<u8, u64>,
    pub ports: BTreeMap<u16, u64>,
    pub ipv4: BTreeMap<Ipv4Addr, u64>,
    pub ipv6: BTreeMap<Ipv6Addr, u64>,
}

impl Snapshot {
    /// Render as a single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// True when no metric and no size was recorded
    pub fn is_empty(&self) -> bool {
        self.total_size == 0
            && self.protocols.is_empty()
            && self.ports.is_empty()
            && self.ipv4.is_empty()
            && self.ipv6.is_empty()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Snapshot", 5)?;
        out.serialize_field("totalSize", &self.total_size)?;
        out.serialize_field("protocols", &Section(&self.protocols))?;
        out.serialize_field("ports", &Section(&self.ports))?;
        out.serialize_field("ipv4", &Section(&self.ipv4))?;
        out.serialize_field("ipv6", &Section(&self.ipv6))?;
        out.end()
    }
}

/// One category rendered as `{"<key>": count, ...}` in map order
struct Section<'a, K>(&'a BTreeMap<K, u64>);

impl<K: Display> Serialize for Section<'_, K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in self.0 {
            map.serialize_entry(&key.to_string(), count)?;
        }
        map.end()
    }
}
