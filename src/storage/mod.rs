//! Storage Module
//!
//! Read-only access to immutable sorted key-value tables.
//!
//! ## Responsibilities
//! - Point lookups by exact key (used for the version record)
//! - Ordered iteration over every entry (used to walk all metric keys)
//!
//! The scanner only talks to tables through [`SortedTable`], so any sorted
//! container that can answer `get` and iterate in key order can back a scan.
//! [`TableReader`] is the on-disk implementation for LevelDB table files.

mod table;

pub use table::{TableIterator, TableReader, FOOTER_SIZE, TABLE_MAGIC};

use crate::error::Result;

/// An immutable table of byte-string keys sorted in ascending byte order
pub trait SortedTable {
    /// Iterator over `(key, value)` pairs in ascending key order
    type Iter<'a>: Iterator<Item = Result<(Vec<u8>, Vec<u8>)>>
    where
        Self: 'a;

    /// Look up a single key
    ///
    /// Returns `Ok(None)` when the key is not present.
    fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Iterate over every entry in key order
    fn iter(&mut self) -> Result<Self::Iter<'_>>;
}
