//! File Filter
//!
//! Decides from a filename alone whether an index file is worth opening.
//!
//! Index files are named by 16 decimal digits; the first 10 are the Unix
//! timestamp (seconds) of the capture window the file covers.

use crate::config::TimeWindow;

/// Length of a valid index filename
pub const FILENAME_DIGITS: usize = 16;

/// Number of leading filename digits holding the epoch seconds
pub const EPOCH_DIGITS: usize = 10;

/// Accept/reject filter applied before a file is opened
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFilter {
    window: Option<TimeWindow>,
}

impl FileFilter {
    /// Create a filter, optionally restricted to a time window
    pub fn new(window: Option<TimeWindow>) -> Self {
        Self { window }
    }

    /// Check whether `filename` should be scanned
    pub fn accepts(&self, filename: &str) -> bool {
        if !is_index_filename(filename) {
            return false;
        }

        match &self.window {
            None => true,
            Some(window) => match file_epoch(filename) {
                Some(epoch) => window.contains(epoch),
                None => false,
            },
        }
    }
}

/// Exactly 16 ASCII digits
pub fn is_index_filename(filename: &str) -> bool {
    filename.len() == FILENAME_DIGITS && filename.bytes().all(|b| b.is_ascii_digit())
}

/// Epoch seconds encoded in the first 10 digits of a filename
pub fn file_epoch(filename: &str) -> Option<i64> {
    filename.get(..EPOCH_DIGITS)?.parse().ok()
}
