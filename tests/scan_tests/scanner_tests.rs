//! Tests for IndexScanner
//!
//! These tests verify:
//! - Version record validation (absent, short, wrong major version)
//! - Per-record skipping of unknown and truncated keys
//! - Companion data-file sizes feeding the total
//! - Skipped files leaving no trace in the aggregator

#[path = "../common/mod.rs"]
mod common;

use std::collections::BTreeMap;
use std::fs::File;
use std::net::{Ipv4Addr, Ipv6Addr};

use capindex::scan::{check_version, IndexScanner};
use capindex::storage::SortedTable;
use capindex::{Aggregator, CapIndexError, Config, Result};
use sstable::{Options, TableBuilder};
use common::{
    ipv4_key, ipv6_key, offsets, port_key, protocol_key, version_entry, version_record,
    CaptureStore,
};

const FILE: &str = "1000000000000000";

fn config_for(store: &CaptureStore) -> Config {
    Config::builder()
        .index_dir(&store.index_dir)
        .workers(1)
        .build()
        .unwrap()
}

// =============================================================================
// In-Memory Table
// =============================================================================

/// Sorted table held in memory; can be told to fail after N entries
struct MemoryTable {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    fail_after: Option<usize>,
}

impl MemoryTable {
    fn new(entries: Vec<(Vec<u8>, Vec<u8>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            fail_after: None,
        }
    }
}

impl SortedTable for MemoryTable {
    type Iter<'a> = Box<dyn Iterator<Item = Result<(Vec<u8>, Vec<u8>)>> + 'a>;

    fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn iter(&mut self) -> Result<Self::Iter<'_>> {
        let fail_after = self.fail_after;
        let iter = self
            .entries
            .iter()
            .enumerate()
            .map(move |(i, (k, v))| match fail_after {
                Some(limit) if i >= limit => {
                    Err(CapIndexError::Storage("simulated read failure".to_string()))
                }
                _ => Ok((k.clone(), v.clone())),
            });
        Ok(Box::new(iter))
    }
}

// =============================================================================
// Version Record
// =============================================================================

#[test]
fn test_version_record_accepted() {
    let mut table = MemoryTable::new(vec![(vec![0], version_record(2, 7))]);
    assert!(check_version(&mut table).is_ok());
}

#[test]
fn test_version_record_missing() {
    let mut table = MemoryTable::new(vec![(protocol_key(6), offsets(1))]);
    assert!(matches!(
        check_version(&mut table),
        Err(CapIndexError::InvalidIndex(_))
    ));
}

#[test]
fn test_version_record_wrong_length() {
    for record in [vec![0, 0, 0, 2], vec![0, 0, 0, 2, 0, 0, 0, 0, 0], vec![]] {
        let mut table = MemoryTable::new(vec![(vec![0], record)]);
        assert!(matches!(
            check_version(&mut table),
            Err(CapIndexError::InvalidIndex(_))
        ));
    }
}

#[test]
fn test_version_record_wrong_major() {
    for major in [0, 1, 3, 0x0200_0000] {
        let mut table = MemoryTable::new(vec![(vec![0], version_record(major, 0))]);
        assert!(check_version(&mut table).is_err(), "major {}", major);
    }
}

// =============================================================================
// scan_table
// =============================================================================

#[test]
fn test_scan_table_decodes_all_categories() {
    let store = CaptureStore::new();
    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let scanner = IndexScanner::new(&config, &aggregator);

    let mut table = MemoryTable::new(vec![
        version_entry(2),
        (protocol_key(6), offsets(3)),
        (port_key(80), offsets(2)),
        (ipv4_key(Ipv4Addr::new(192, 168, 1, 1)), offsets(4)),
        (ipv6_key("2001:db8::1".parse().unwrap()), offsets(5)),
    ]);

    let stats = scanner.scan_table(&mut table).unwrap();
    assert_eq!(stats.records_decoded, 4);
    assert_eq!(stats.records_skipped, 1); // the version record
    assert_eq!(stats.data_size, None);

    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.protocols[&6], 3);
    assert_eq!(snapshot.ports[&80], 2);
    assert_eq!(snapshot.ipv4[&Ipv4Addr::new(192, 168, 1, 1)], 4);
    assert_eq!(
        snapshot.ipv6[&"2001:db8::1".parse::<Ipv6Addr>().unwrap()],
        5
    );
    assert_eq!(snapshot.total_size, 0);
}

#[test]
fn test_scan_table_skips_bad_records_only() {
    let store = CaptureStore::new();
    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let scanner = IndexScanner::new(&config, &aggregator);

    let mut table = MemoryTable::new(vec![
        version_entry(2),
        (vec![1], offsets(9)),             // truncated protocol key
        (vec![4, 10, 0], offsets(9)),      // truncated ipv4 key
        (vec![9, 1, 2, 3], offsets(9)),    // unknown tag
        (protocol_key(17), vec![0u8; 13]), // 13 bytes → weight 3
    ]);

    let stats = scanner.scan_table(&mut table).unwrap();
    assert_eq!(stats.records_decoded, 1);
    assert_eq!(stats.records_skipped, 4);

    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.protocols.len(), 1);
    assert_eq!(snapshot.protocols[&17], 3);
    assert!(snapshot.ipv4.is_empty());
}

#[test]
fn test_scan_table_failure_midway_contributes_nothing() {
    let store = CaptureStore::new();
    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let scanner = IndexScanner::new(&config, &aggregator);

    let mut table = MemoryTable::new(vec![
        version_entry(2),
        (protocol_key(6), offsets(3)),
        (protocol_key(17), offsets(3)),
    ]);
    table.fail_after = Some(2);

    assert!(scanner.scan_table(&mut table).is_err());
    assert!(aggregator.snapshot().is_empty());
}

// =============================================================================
// scan_file
// =============================================================================

#[test]
fn test_scan_file_adds_companion_size() {
    let store = CaptureStore::new();
    store.write_index(FILE, &[(protocol_key(6), offsets(2))]);
    store.write_data(FILE, 4096);

    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let stats = IndexScanner::new(&config, &aggregator)
        .scan_file(FILE)
        .unwrap();

    assert_eq!(stats.data_size, Some(4096));
    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.total_size, 4096);
    assert_eq!(snapshot.protocols[&6], 2);
}

#[test]
fn test_scan_file_without_companion_counts_zero_size() {
    let store = CaptureStore::new();
    store.write_index(FILE, &[(port_key(443), offsets(7))]);

    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let stats = IndexScanner::new(&config, &aggregator)
        .scan_file(FILE)
        .unwrap();

    assert_eq!(stats.data_size, None);
    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.total_size, 0);
    assert_eq!(snapshot.ports[&443], 7);
}

#[test]
fn test_scan_file_missing_index_is_error() {
    let store = CaptureStore::new();
    store.write_data(FILE, 100);

    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let result = IndexScanner::new(&config, &aggregator).scan_file(FILE);

    assert!(matches!(result, Err(CapIndexError::Io(_))));
    assert!(aggregator.snapshot().is_empty());
}

#[test]
fn test_scan_file_bad_version_leaves_no_trace() {
    let store = CaptureStore::new();
    store.write_raw_index(
        FILE,
        &[
            (vec![0], version_record(1, 0)),
            (protocol_key(6), offsets(10)),
        ],
    );
    store.write_data(FILE, 2048);

    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let result = IndexScanner::new(&config, &aggregator).scan_file(FILE);

    assert!(matches!(result, Err(CapIndexError::InvalidIndex(_))));
    let snapshot = aggregator.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.total_size, 0);
}

#[test]
fn test_scan_file_not_a_table() {
    let store = CaptureStore::new();
    store.write_index_bytes(FILE, b"this is not an index file at all, just text");
    store.write_data(FILE, 2048);

    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let result = IndexScanner::new(&config, &aggregator).scan_file(FILE);

    assert!(matches!(result, Err(CapIndexError::Storage(_))));
    assert_eq!(aggregator.total_size(), 0);
}

#[test]
fn test_scan_file_reads_leveldb_table() {
    let store = CaptureStore::new();

    // Built directly with the LevelDB table builder, in key order, the way
    // the capture indexer lays out an index file
    let mut entries: BTreeMap<Vec<u8>, Vec<u8>> = BTreeMap::new();
    entries.insert(vec![0], version_record(2, 1));
    entries.insert(protocol_key(17), offsets(3));
    entries.insert(port_key(53), offsets(3));
    for host in 0..=255u8 {
        entries.insert(ipv4_key(Ipv4Addr::new(10, 1, 0, host)), offsets(4));
    }
    entries.insert(ipv6_key(Ipv6Addr::LOCALHOST), offsets(1));

    let file = File::create(store.index_path(FILE)).unwrap();
    let mut builder = TableBuilder::new(Options::default(), file);
    for (key, value) in &entries {
        builder.add(key, value).unwrap();
    }
    builder.finish().unwrap();
    store.write_data(FILE, 512);

    let config = config_for(&store);
    let aggregator = Aggregator::new();
    let stats = IndexScanner::new(&config, &aggregator)
        .scan_file(FILE)
        .unwrap();

    assert_eq!(stats.records_decoded, 259);
    assert_eq!(stats.records_skipped, 1);

    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.total_size, 512);
    assert_eq!(snapshot.protocols[&17], 3);
    assert_eq!(snapshot.ports[&53], 3);
    assert_eq!(snapshot.ipv4.len(), 256);
    assert_eq!(snapshot.ipv4[&Ipv4Addr::new(10, 1, 0, 200)], 4);
    assert_eq!(snapshot.ipv6[&Ipv6Addr::LOCALHOST], 1);
}
