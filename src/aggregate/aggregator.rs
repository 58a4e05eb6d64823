//! Aggregator implementation
//!
//! Per-category hash maps, each behind its own RwLock.

use std::collections::HashMap;
use std::hash::Hash;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::key::{DecodedMetric, Metric};

use super::Snapshot;

/// Accumulates metric counts from every worker of a run
///
/// ## Concurrency:
/// - Category maps: one RwLock each (writers exclusive per map)
/// - `total_size`: atomic counter (lock-free)
/// - All methods use `&self`; workers borrow it from scoped threads
#[derive(Debug, Default)]
pub struct Aggregator {
    protocols: RwLock<HashMap<u8, u64>>,
    ports: RwLock<HashMap<u16, u64>>,
    ipv4: RwLock<HashMap<Ipv4Addr, u64>>,
    ipv6: RwLock<HashMap<Ipv6Addr, u64>>,
    total_size: AtomicU64,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` packets to an IP protocol number
    pub fn add_protocol(&self, protocol: u8, weight: u64) {
        bump(&mut self.protocols.write(), protocol, weight);
    }

    /// Add `weight` packets to a port
    pub fn add_port(&self, port: u16, weight: u64) {
        bump(&mut self.ports.write(), port, weight);
    }

    /// Add `weight` packets to an IPv4 address
    pub fn add_ipv4(&self, addr: Ipv4Addr, weight: u64) {
        bump(&mut self.ipv4.write(), addr, weight);
    }

    /// Add `weight` packets to an IPv6 address
    pub fn add_ipv6(&self, addr: Ipv6Addr, weight: u64) {
        bump(&mut self.ipv6.write(), addr, weight);
    }

    /// Add the size of one companion capture file
    pub fn add_size(&self, bytes: u64) {
        self.total_size.fetch_add(bytes, Ordering::SeqCst);
    }

    /// Route a decoded metric to the matching add operation
    pub fn apply(&self, decoded: &DecodedMetric) {
        match decoded.metric {
            Metric::Protocol(p) => self.add_protocol(p, decoded.weight),
            Metric::Port(p) => self.add_port(p, decoded.weight),
            Metric::Ipv4(addr) => self.add_ipv4(addr, decoded.weight),
            Metric::Ipv6(addr) => self.add_ipv6(addr, decoded.weight),
        }
    }

    /// Fold a finished per-file tally into the shared maps
    ///
    /// Takes each map's write lock once rather than once per record.
    pub fn merge(&self, tally: Tally) {
        merge_into(&self.protocols, tally.protocols);
        merge_into(&self.ports, tally.ports);
        merge_into(&self.ipv4, tally.ipv4);
        merge_into(&self.ipv6, tally.ipv6);
    }

    /// Copy the current state
    ///
    /// Holds every map's read lock for the duration of the copy, so no
    /// writer can interleave; sorting happens after the locks are released.
    pub fn snapshot(&self) -> Snapshot {
        let (protocols, ports, ipv4, ipv6) = {
            let protocols = self.protocols.read();
            let ports = self.ports.read();
            let ipv4 = self.ipv4.read();
            let ipv6 = self.ipv6.read();
            (
                protocols.clone(),
                ports.clone(),
                ipv4.clone(),
                ipv6.clone(),
            )
        };

        Snapshot {
            total_size: self.total_size.load(Ordering::SeqCst),
            protocols: protocols.into_iter().collect(),
            ports: ports.into_iter().collect(),
            ipv4: ipv4.into_iter().collect(),
            ipv6: ipv6.into_iter().collect(),
        }
    }

    /// Current total size (for progress logging)
    pub fn total_size(&self) -> u64 {
        self.total_size.load(Ordering::SeqCst)
    }
}

/// Increment-or-insert shared by the aggregator, the merge and [`Tally`]
fn bump<K: Eq + Hash>(map: &mut HashMap<K, u64>, key: K, weight: u64) {
    *map.entry(key).or_insert(0) += weight;
}

fn merge_into<K: Eq + Hash>(target: &RwLock<HashMap<K, u64>>, source: HashMap<K, u64>) {
    if source.is_empty() {
        return;
    }
    let mut map = target.write();
    for (key, weight) in source {
        bump(&mut map, key, weight);
    }
}

/// Unshared counts collected while scanning a single file
///
/// A scanner fills one of these and hands it to [`Aggregator::merge`] only
/// after the whole file was read, so a file that fails midway contributes
/// nothing.
#[derive(Debug, Default)]
pub struct Tally {
    protocols: HashMap<u8, u64>,
    ports: HashMap<u16, u64>,
    ipv4: HashMap<Ipv4Addr, u64>,
    ipv6: HashMap<Ipv6Addr, u64>,
    records: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decoded metric
    pub fn record(&mut self, decoded: &DecodedMetric) {
        match decoded.metric {
            Metric::Protocol(p) => bump(&mut self.protocols, p, decoded.weight),
            Metric::Port(p) => bump(&mut self.ports, p, decoded.weight),
            Metric::Ipv4(addr) => bump(&mut self.ipv4, addr, decoded.weight),
            Metric::Ipv6(addr) => bump(&mut self.ipv6, addr, decoded.weight),
        }
        self.records += 1;
    }

    /// Number of metrics recorded
    pub fn records(&self) -> u64 {
        self.records
    }
}
