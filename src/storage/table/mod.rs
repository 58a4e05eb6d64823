//! Table Module
//!
//! Immutable on-disk sorted key-value table, as produced by the capture
//! indexer. Index files are LevelDB tables; block decoding, restart points,
//! block checksums and snappy decompression are handled by the `sstable`
//! crate.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Data Blocks (variable)                                  │
//! │   prefix-compressed entries, ascending key order        │
//! │   each block: [contents][compression: u8][crc32c: u32]  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Meta Blocks (optional, e.g. filter)                     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Metaindex Block                                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Index Block                                             │
//! │   last key of each data block → BlockHandle             │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (48 bytes)                                       │
//! │   Metaindex handle | Index handle | Padding | Magic (8) │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The footer magic is a little-endian u64. The table format is unrelated
//! to the index content version stored under key `[0]`.

mod iterator;
mod reader;

pub use iterator::TableIterator;
pub use reader::TableReader;

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic number closing every LevelDB table file
pub const TABLE_MAGIC: u64 = 0xdb47_7524_8b80_fb57;

/// Footer size: two padded block handles (40) + Magic (8) = 48 bytes
pub const FOOTER_SIZE: u64 = 48;
