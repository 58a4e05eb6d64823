//! Tests for Summarizer
//!
//! These tests verify:
//! - Directory listing feeds every entry to the scan
//! - End-to-end summary of a capture store
//! - Data directory derivation (IDX0 → PKT0)
//! - Run-fatal failure on an unreadable index directory

#[path = "../common/mod.rs"]
mod common;

use std::net::{Ipv4Addr, Ipv6Addr};

use capindex::engine::list_index_dir;
use capindex::{CapIndexError, Config, Summarizer};
use common::{ipv4_key, ipv6_key, offsets, port_key, protocol_key, CaptureStore};

// =============================================================================
// Helper Functions
// =============================================================================

/// Two valid files sharing some keys, plus noise in the index directory
fn sample_store() -> CaptureStore {
    let store = CaptureStore::new();

    store.write_index(
        "1000000000000000",
        &[
            (protocol_key(6), offsets(20)),
            (protocol_key(17), offsets(5)),
            (port_key(80), offsets(100)),
            (port_key(443), offsets(50)),
            (ipv4_key(Ipv4Addr::new(192, 168, 1, 1)), offsets(25)),
        ],
    );
    store.write_data("1000000000000000", 1024);

    store.write_index(
        "1000000060000000",
        &[
            (protocol_key(6), offsets(5)),
            (port_key(80), offsets(25)),
            (ipv6_key(Ipv6Addr::LOCALHOST), offsets(50)),
        ],
    );
    store.write_data("1000000060000000", 2048);

    // Not index files
    store.write_index_bytes("notes.txt", b"hello");
    store.write_index_bytes("1000000120000000.tmp", b"partial");

    store
}

// =============================================================================
// Directory Listing
// =============================================================================

#[test]
fn test_list_index_dir_returns_sorted_names() {
    let store = sample_store();

    let names = list_index_dir(&store.index_dir).unwrap();
    assert_eq!(
        names,
        vec![
            "1000000000000000",
            "1000000060000000",
            "1000000120000000.tmp",
            "notes.txt",
        ]
    );
}

#[test]
fn test_list_missing_dir_is_error() {
    let store = CaptureStore::new();
    let missing = store.index_dir.join("nope");

    assert!(matches!(list_index_dir(&missing), Err(CapIndexError::Io(_))));
}

// =============================================================================
// End-to-End
// =============================================================================

#[test]
fn test_summarize_store() {
    let store = sample_store();
    let config = Config::builder()
        .index_dir(&store.index_dir)
        .workers(4)
        .build()
        .unwrap();

    assert_eq!(config.data_dir, store.data_dir);

    let summary = Summarizer::new(config).run().unwrap();

    assert_eq!(summary.stats.files_submitted, 4);
    assert_eq!(summary.stats.files_scanned, 2);
    assert_eq!(summary.stats.files_filtered, 2);
    assert_eq!(
        summary.snapshot.to_json().unwrap(),
        concat!(
            r#"{"totalSize":3072,"#,
            r#""protocols":{"6":25,"17":5},"#,
            r#""ports":{"80":125,"443":50},"#,
            r#""ipv4":{"192.168.1.1":25},"#,
            r#""ipv6":{"::1":50}}"#
        )
    );
}

#[test]
fn test_summarize_with_window() {
    let store = sample_store();
    let config = Config::builder()
        .index_dir(&store.index_dir)
        .window(1_000_000_100, 1_000_000_200)
        .build()
        .unwrap();

    let summary = Summarizer::new(config).run().unwrap();

    // Only 1000000060 is within [start - 60, end + 60]
    assert_eq!(summary.stats.files_scanned, 1);
    assert_eq!(summary.snapshot.total_size, 2048);
    assert_eq!(summary.snapshot.protocols[&6], 5);
    assert!(summary.snapshot.ipv4.is_empty());
}

#[test]
fn test_summarize_empty_dir() {
    let store = CaptureStore::new();
    let config = Config::builder()
        .index_dir(&store.index_dir)
        .build()
        .unwrap();

    let summary = Summarizer::new(config).run().unwrap();
    assert!(summary.snapshot.is_empty());
    assert_eq!(
        summary.snapshot.to_json().unwrap(),
        r#"{"totalSize":0,"protocols":{},"ports":{},"ipv4":{},"ipv6":{}}"#
    );
}

#[test]
fn test_summarize_missing_dir_is_fatal() {
    let store = CaptureStore::new();
    let config = Config::builder()
        .index_dir(store.index_dir.join("IDX0-missing"))
        .build()
        .unwrap();

    let summarizer = Summarizer::new(config);
    assert!(summarizer.config().index_dir.ends_with("IDX0-missing"));
    assert!(summarizer.run().is_err());
}

#[test]
fn test_run_files_ignores_directory_contents() {
    let store = sample_store();
    let config = Config::builder()
        .index_dir(&store.index_dir)
        .build()
        .unwrap();

    let summary = Summarizer::new(config)
        .run_files(vec!["1000000060000000".to_string()])
        .unwrap();

    assert_eq!(summary.stats.files_submitted, 1);
    assert_eq!(summary.snapshot.total_size, 2048);
}
