//! Engine Module
//!
//! Top-level entry point that ties the components together for one run.
//!
//! ## Responsibilities
//! - List the index directory (the only run-fatal I/O)
//! - Own the run's aggregator
//! - Drive the scan coordinator and take the final snapshot

use std::fs;
use std::path::Path;

use crate::aggregate::{Aggregator, Snapshot};
use crate::config::Config;
use crate::error::Result;
use crate::scan::{ScanCoordinator, ScanStats};

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct Summary {
    /// Sorted aggregate state
    pub snapshot: Snapshot,
    /// Run counters (files and records handled)
    pub stats: ScanStats,
}

/// Summarizes an index directory according to a [`Config`]
pub struct Summarizer {
    config: Config,
}

impl Summarizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the config this summarizer was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the configured index directory
    ///
    /// Fails only when the directory itself cannot be listed.
    pub fn run(&self) -> Result<Summary> {
        let filenames = list_index_dir(&self.config.index_dir)?;
        tracing::info!(
            index_dir = %self.config.index_dir.display(),
            data_dir = %self.config.data_dir.display(),
            candidates = filenames.len(),
            workers = self.config.workers,
            "Starting scan"
        );
        self.run_files(filenames)
    }

    /// Scan an explicit list of filenames relative to the index directory
    pub fn run_files<I>(&self, filenames: I) -> Result<Summary>
    where
        I: IntoIterator<Item = String>,
    {
        let aggregator = Aggregator::new();
        let stats = ScanCoordinator::new(&self.config, &aggregator).run(filenames)?;
        let snapshot = aggregator.snapshot();

        tracing::info!(
            scanned = stats.files_scanned,
            skipped = stats.files_skipped,
            filtered = stats.files_filtered,
            total_size = snapshot.total_size,
            "Scan complete"
        );

        Ok(Summary { snapshot, stats })
    }
}

/// List the entry names of an index directory, sorted
///
/// Names that are not valid UTF-8 can never be index files and are dropped.
pub fn list_index_dir(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
