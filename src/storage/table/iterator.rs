//! Table Iterator
//!
//! Adapts the block-level cursor of a table to a plain Rust iterator.

use sstable::SSIterator;

use crate::error::Result;

/// Iterator over table entries in sorted key order
///
/// Data-block load errors are not surfaced by the underlying cursor.
pub struct TableIterator {
    cursor: Box<dyn SSIterator>,
}

impl TableIterator {
    pub(super) fn new(cursor: Box<dyn SSIterator>) -> Self {
        Self { cursor }
    }
}

impl Iterator for TableIterator {
    type Item = Result<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.advance() {
            return None;
        }

        let mut key = Vec::new();
        let mut value = Vec::new();
        if !self.cursor.current(&mut key, &mut value) {
            return None;
        }
        Some(Ok((key, value)))
    }
}
