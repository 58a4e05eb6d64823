//! Scan Module
//!
//! Concurrent scan of an index directory.
//!
//! ## Responsibilities
//! - Reject badly named or out-of-window files before opening them
//! - Validate and decode one index file at a time
//! - Distribute files over a fixed worker pool and wait for all of them
//!
//! ## Failure Policy
//! A file that cannot be opened, has no valid version record, or fails while
//! being read is skipped whole. A key that cannot be decoded is skipped alone.
//! Neither is reported to the caller beyond the counters in [`ScanStats`].

mod coordinator;
mod filter;
mod scanner;

pub use coordinator::{ScanCoordinator, ScanStats};
pub use filter::{file_epoch, is_index_filename, FileFilter, EPOCH_DIGITS, FILENAME_DIGITS};
pub use scanner::{check_version, FileStats, IndexScanner, VERSION_RECORD_SIZE};
