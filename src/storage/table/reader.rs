//! Table Reader
//!
//! Opens LevelDB table files and answers point lookups through the table's
//! index block.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use sstable::{Options, Table};

use crate::error::{CapIndexError, Result};
use crate::storage::SortedTable;

use super::iterator::TableIterator;
use super::{FOOTER_SIZE, TABLE_MAGIC};

/// Reader for a single index table
pub struct TableReader {
    table: Table,
    /// Size of the table file in bytes
    file_size: u64,
}

impl TableReader {
    /// Open a table for reading
    ///
    /// Checks the footer magic before handing the file to the block reader,
    /// so truncated and foreign files fail with a clear message. A missing
    /// or unreadable file is reported as `CapIndexError::Io`, anything else
    /// as `CapIndexError::Storage`.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();

        if file_size < FOOTER_SIZE {
            return Err(CapIndexError::Storage(format!(
                "Table too small: {} bytes",
                file_size
            )));
        }

        // Read and validate the footer magic
        file.seek(SeekFrom::End(-8))?;
        let mut magic = [0u8; 8];
        file.read_exact(&mut magic)?;

        let magic = u64::from_le_bytes(magic);
        if magic != TABLE_MAGIC {
            return Err(CapIndexError::Storage(format!(
                "Invalid table magic: expected {:016x}, got {:016x}",
                TABLE_MAGIC, magic
            )));
        }
        drop(file);

        let table = Table::new_from_file(Options::default(), path).map_err(storage_error)?;

        Ok(Self { table, file_size })
    }

    /// Get a value by key
    ///
    /// Returns:
    /// - `Ok(Some(value))` — key found
    /// - `Ok(None)` — key not in this table
    pub fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let value = self.table.get(key).map_err(storage_error)?;
        Ok(value.map(Vec::from))
    }

    /// Size of the table file in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Create an iterator over all entries in key order
    pub fn iter(&mut self) -> Result<TableIterator> {
        Ok(TableIterator::new(Box::new(self.table.iter())))
    }
}

impl SortedTable for TableReader {
    type Iter<'a> = TableIterator;

    fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        TableReader::get(self, key)
    }

    fn iter(&mut self) -> Result<Self::Iter<'_>> {
        TableReader::iter(self)
    }
}

fn storage_error(status: sstable::Status) -> CapIndexError {
    CapIndexError::Storage(status.to_string())
}
