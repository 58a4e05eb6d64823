//! Index Scanner
//!
//! Reads one index file end to end and folds its metrics into the shared
//! aggregator.
//!
//! ## Steps
//! 1. Open the table (failure ⇒ file skipped)
//! 2. Check the version record under key `[0]` (failure ⇒ file skipped)
//! 3. Decode every entry into a file-local [`Tally`]; unknown or malformed
//!    keys skip only that entry
//! 4. Merge the tally, then add the companion capture file's size

use std::fs;
use std::path::Path;

use crate::aggregate::{Aggregator, Tally};
use crate::config::Config;
use crate::error::{CapIndexError, Result};
use crate::key::{decode_key, MAJOR_VERSION, VERSION_KEY};
use crate::storage::{SortedTable, TableReader};

/// Size of the version record: major (4, BE) + minor (4, BE)
pub const VERSION_RECORD_SIZE: usize = 8;

/// Per-file counters returned by a successful scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Entries decoded into a metric
    pub records_decoded: u64,
    /// Entries skipped (unknown tag, malformed key, version record)
    pub records_skipped: u64,
    /// Size of the companion capture file, if it could be stat'ed
    pub data_size: Option<u64>,
}

/// Scans index files for one run
pub struct IndexScanner<'a> {
    config: &'a Config,
    aggregator: &'a Aggregator,
}

impl<'a> IndexScanner<'a> {
    pub fn new(config: &'a Config, aggregator: &'a Aggregator) -> Self {
        Self { config, aggregator }
    }

    /// Scan `index_dir/<filename>` and its companion `data_dir/<filename>`
    ///
    /// Any error means the file was skipped and left no trace in the
    /// aggregator.
    pub fn scan_file(&self, filename: &str) -> Result<FileStats> {
        let path = self.config.index_dir.join(filename);
        let mut table = TableReader::open(&path)?;

        tracing::trace!(
            file = %filename,
            bytes = table.file_size(),
            "Opened index file"
        );

        let mut stats = self.scan_table(&mut table)?;

        stats.data_size = companion_size(&self.config.data_dir.join(filename));
        if let Some(size) = stats.data_size {
            self.aggregator.add_size(size);
        }

        Ok(stats)
    }

    /// Validate and decode an already opened table
    ///
    /// Metrics are only merged into the aggregator once iteration finished
    /// without error. The companion file size is not touched here.
    pub fn scan_table<T: SortedTable>(&self, table: &mut T) -> Result<FileStats> {
        check_version(table)?;

        let mut tally = Tally::new();
        let mut stats = FileStats::default();

        for entry in table.iter()? {
            let (key, value) = entry?;
            match decode_key(&key, value.len()) {
                Ok(Some(decoded)) => tally.record(&decoded),
                Ok(None) => stats.records_skipped += 1,
                Err(e) => {
                    tracing::trace!(error = %e, "Skipping index record");
                    stats.records_skipped += 1;
                }
            }
        }

        stats.records_decoded = tally.records();
        self.aggregator.merge(tally);
        Ok(stats)
    }
}

/// Check the version record stored under key `[0]`
///
/// The record must be exactly 8 bytes and its first 4 (big-endian) must equal
/// `MAJOR_VERSION`. The minor version in the last 4 bytes is not checked.
pub fn check_version<T: SortedTable>(table: &mut T) -> Result<()> {
    let record = table
        .get(VERSION_KEY)?
        .ok_or_else(|| CapIndexError::InvalidIndex("missing version record".to_string()))?;

    if record.len() != VERSION_RECORD_SIZE {
        return Err(CapIndexError::InvalidIndex(format!(
            "version record is {} bytes, expected {}",
            record.len(),
            VERSION_RECORD_SIZE
        )));
    }

    let major = u32::from_be_bytes([record[0], record[1], record[2], record[3]]);
    if major != MAJOR_VERSION {
        return Err(CapIndexError::InvalidIndex(format!(
            "version mismatch, want {} got {}",
            MAJOR_VERSION, major
        )));
    }

    Ok(())
}

/// Size of the companion capture file; `None` when it cannot be stat'ed
fn companion_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.len()),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "No companion data file");
            None
        }
    }
}
